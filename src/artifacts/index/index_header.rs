use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::{anyhow, ensure};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::BufRead;

/// Fixed-size prologue of the index file
///
/// Only the entry count varies; signature and version are checked on load so
/// a foreign or newer file is never misread as a staging area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    pub(crate) fn with_entries(entries_count: u32) -> Self {
        IndexHeader { entries_count }
    }
}

impl Packable for IndexHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(SIGNATURE.as_bytes());
        bytes.write_u32::<NetworkEndian>(VERSION)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut signature = [0u8; 4];
        reader
            .read_exact(&mut signature)
            .map_err(|_| anyhow!("Truncated index header"))?;
        ensure!(
            signature == SIGNATURE.as_bytes(),
            "Invalid index file signature"
        );

        let version = reader.read_u32::<NetworkEndian>()?;
        ensure!(version == VERSION, "Unsupported index file version: {version}");

        Ok(IndexHeader::with_entries(reader.read_u32::<NetworkEndian>()?))
    }
}
