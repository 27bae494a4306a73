//! Merge algorithms
//!
//! - `lca_finder`: the split point of two branch tips
//! - `resolution`: per-file three-way classification and conflict content

pub mod lca_finder;
pub mod resolution;
