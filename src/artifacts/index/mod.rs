//! Staging index file format
//!
//! The index records the files staged for addition and for removal relative
//! to the current commit.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "BLIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length, sorted by name):
//!   - Kind: 1 = addition, 2 = removal (4 bytes)
//!   - Staged blob ID, zeroed for removals (20 bytes)
//!   - Name length (2 bytes)
//!   - Name, NUL terminated and padded to 8-byte alignment
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "BLIX";

/// Index file format version
pub const VERSION: u32 = 1;
