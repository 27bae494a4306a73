//! Core utilities and shared types
//!
//! - `errors`: the typed failures commands report to the user
//! - `pager`: routes long command output through the `minus` pager

pub mod errors;
pub mod pager;
