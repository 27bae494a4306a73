//! Working directory status inspection
//!
//! - `file_change`: how a working file differs from what would be committed
//! - `inspector`: per-file comparisons against the workspace
//! - `status_info`: the sections printed by `status`

pub mod file_change;
pub mod inspector;
pub mod status_info;
