//! Commit history traversal
//!
//! - `rev_list`: lazy first-parent walk from a revision back to the root commit

pub mod rev_list;
