//! Checkout operations and conflict handling
//!
//! Switching the working directory to another commit, as done by
//! `checkout <branch>`, `reset` and fast-forward merges. All conflicts are
//! detected before the working directory is changed.

pub mod conflict;
pub mod migration;
