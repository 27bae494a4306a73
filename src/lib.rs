//! Bitlet: a small single-user version-control engine.
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: the storage areas of a repository (object store, staging index,
//!   refs, working directory) and the `Repository` handle tying them together
//! - `artifacts`: data types and algorithms operating on those areas
//! - `commands`: the user-facing operations, implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
