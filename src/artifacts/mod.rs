//! Repository data types and algorithms
//!
//! - `branch`: branch names and commit revisions
//! - `checkout`: moving the working directory between commits
//! - `core`: error taxonomy and the pager wrapper
//! - `index`: staging index file format
//! - `log`: commit history traversal
//! - `merge`: split point search and three-way file classification
//! - `objects`: stored object types (blob, commit)
//! - `status`: working directory status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
