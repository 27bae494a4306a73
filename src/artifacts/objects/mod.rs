//! Stored object types and operations
//!
//! Everything the repository persists is an immutable object identified by
//! the SHA-1 of its serialization. There are two kinds:
//!
//! - **Blob**: the raw bytes of one file version
//! - **Commit**: message, timestamp, tracked files and up to two parents
//!
//! All objects share the framed format `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form used in human-readable output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
