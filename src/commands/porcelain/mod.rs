//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Create a repository with its root commit
//! - `add` / `rm`: Stage files for addition or removal
//! - `commit`: Record the staged changes
//! - `log`: Show first-parent history, every commit, or commits by message
//! - `status`: Show branches, staged changes and working directory changes
//! - `checkout`: Restore files or switch branches
//! - `reset`: Move the current branch to any commit
//! - `branch`: Create or delete branches
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
