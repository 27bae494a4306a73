//! Plumbing commands (low-level object operations)
//!
//! Plumbing commands give direct access to the object store. They are used for
//! scripting and as building blocks for porcelain commands.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob ID and optionally store the blob
//! - `cat-file`: Print a stored object
//! - `write_commit`: Turn the staging area into a commit (internal)

pub mod cat_file;
pub mod hash_object;
mod write_commit;
