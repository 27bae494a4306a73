//! Storage areas of a repository
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `index`: staging area for the next commit
//! - `refs`: branch table and HEAD
//! - `repository`: the handle tying the areas together
//! - `workspace`: working directory file operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
