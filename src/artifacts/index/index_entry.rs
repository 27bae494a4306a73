//! Staging index entry representation
//!
//! Each entry stages one filename, either for addition (with the ID of the
//! staged blob) or for removal.
//!
//! ## Entry Format
//!
//! Entries are stored in a binary format with 8-byte alignment. The name is
//! NUL terminated, so a reader can take `ENTRY_MIN_SIZE` bytes and then whole
//! `ENTRY_BLOCK`s until the last byte read is zero.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Maximum name length recorded in the length field
const MAX_NAME_SIZE: usize = 0xfff;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Minimum size of an index entry in bytes
pub const ENTRY_MIN_SIZE: usize = 32;

/// Size of the fixed part preceding the name
const ENTRY_FIXED_SIZE: usize = 26;

const ADDITION_KIND: u32 = 1;
const REMOVAL_KIND: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    /// `name` is staged with the content of blob `oid`
    Addition { name: String, oid: ObjectId },
    /// `name` will be dropped from the tracked files by the next commit
    Removal { name: String },
}

impl IndexEntry {
    pub fn name(&self) -> &str {
        match self {
            IndexEntry::Addition { name, .. } | IndexEntry::Removal { name } => name,
        }
    }

    fn kind(&self) -> u32 {
        match self {
            IndexEntry::Addition { .. } => ADDITION_KIND,
            IndexEntry::Removal { .. } => REMOVAL_KIND,
        }
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let name = self.name();
        if name.is_empty() || name.as_bytes().contains(&0) {
            anyhow::bail!("Invalid entry name: {name:?}");
        }

        let mut entry_bytes = Vec::new();
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.kind())?;
        match self {
            IndexEntry::Addition { oid, .. } => oid.write_h40_to(&mut entry_bytes)?,
            IndexEntry::Removal { .. } => entry_bytes.write_all(&[0; 20])?,
        }
        entry_bytes
            .write_u16::<byteorder::NetworkEndian>(name.len().min(MAX_NAME_SIZE) as u16)?;
        entry_bytes.write_all(name.as_bytes())?;

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 || entry_bytes.len() < ENTRY_MIN_SIZE {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_MIN_SIZE {
            return Err(anyhow::anyhow!("Invalid index entry size"));
        }

        let kind = byteorder::NetworkEndian::read_u32(&bytes[0..4]);
        let mut oid_bytes = std::io::Cursor::new(&bytes[4..24]);
        let oid = ObjectId::read_h40_from(&mut oid_bytes)?;

        let name_end = bytes[ENTRY_FIXED_SIZE..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| anyhow::anyhow!("Missing null terminator in entry name"))?;
        let name = std::str::from_utf8(&bytes[ENTRY_FIXED_SIZE..ENTRY_FIXED_SIZE + name_end])
            .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in entry name"))?
            .to_string();

        match kind {
            ADDITION_KIND => Ok(IndexEntry::Addition { name, oid }),
            REMOVAL_KIND => Ok(IndexEntry::Removal { name }),
            _ => Err(anyhow::anyhow!("Invalid index entry kind: {kind}")),
        }
    }
}
