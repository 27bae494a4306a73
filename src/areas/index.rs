//! Staging area
//!
//! The index records which files the next commit will add or change and which
//! tracked files it will drop. Blob bodies for staged additions live in a
//! separate object store under `.bitlet/staging/`, so nothing reaches the
//! permanent store until a commit is written.
//!
//! ## Invariants
//!
//! - A filename is never staged for addition and for removal at once
//! - Every staged addition has its blob in the staging store
//!
//! ## Locking
//!
//! The index file is read under a shared lock and written under an exclusive
//! lock, and the checksum trailer is verified on every load.

use crate::areas::database::Database;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_BLOCK, ENTRY_MIN_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug)]
pub struct Index {
    /// Path to the index file (`.bitlet/index`)
    path: Box<Path>,
    /// Store holding the blobs of staged additions
    staging: Database,
    /// Filenames staged for addition, with the staged blob ID
    additions: BTreeMap<String, ObjectId>,
    /// Tracked filenames staged for removal
    removals: BTreeSet<String>,
    header: IndexHeader,
}

impl Index {
    pub fn new(path: Box<Path>, staging_path: Box<Path>) -> Self {
        Index {
            path,
            staging: Database::new(staging_path),
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            header: IndexHeader::with_entries(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staging(&self) -> &Database {
        &self.staging
    }

    /// Load the index from disk
    ///
    /// A missing or empty index file is an empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset_entries();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let entries_count = self.parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()?;
        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "loaded index"
        );

        Ok(())
    }

    fn reset_entries(&mut self) {
        self.additions.clear();
        self.removals.clear();
        self.header = IndexHeader::with_entries(0);
    }

    fn parse_header(&self, reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        Ok(header.entries_count)
    }

    fn parse_entries(&mut self, entries_count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let mut entry_bytes = reader.read(ENTRY_MIN_SIZE)?.to_vec();

            while entry_bytes[entry_bytes.len() - 1] != 0 {
                entry_bytes.extend_from_slice(&reader.read(ENTRY_BLOCK)?);
            }

            match IndexEntry::deserialize(std::io::Cursor::new(Bytes::from(entry_bytes)))? {
                IndexEntry::Addition { name, oid } => {
                    self.additions.insert(name, oid);
                }
                IndexEntry::Removal { name } => {
                    self.removals.insert(name);
                }
            }
        }

        self.header.entries_count = entries_count;

        Ok(())
    }

    /// Persist the index, replacing whatever is on disk
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let entries = self.entries();
        self.header = IndexHeader::with_entries(entries.len() as u32);
        writer.write(&self.header.serialize()?)?;

        for entry in entries {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;

        Ok(())
    }

    /// All entries in filename order
    pub fn entries(&self) -> Vec<IndexEntry> {
        let mut entries = self
            .additions
            .iter()
            .map(|(name, oid)| IndexEntry::Addition {
                name: name.clone(),
                oid: oid.clone(),
            })
            .chain(self.removals.iter().map(|name| IndexEntry::Removal {
                name: name.clone(),
            }))
            .collect::<Vec<_>>();

        entries.sort_by(|left, right| left.name().cmp(right.name()));
        entries
    }

    /// Stage `blob` as the content of `name`, clearing any removal mark
    pub fn stage_addition(&mut self, name: &str, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = self.staging.store(blob)?;

        self.removals.remove(name);
        self.additions.insert(name.to_string(), oid.clone());

        Ok(oid)
    }

    /// Mark `name` for removal, dropping any staged addition
    pub fn stage_removal(&mut self, name: &str) {
        self.additions.remove(name);
        self.removals.insert(name.to_string());
    }

    /// Drop the staged addition of `name`, returning whether there was one
    pub fn unstage_addition(&mut self, name: &str) -> bool {
        self.additions.remove(name).is_some()
    }

    /// Drop the removal mark of `name`, returning whether there was one
    pub fn unstage_removal(&mut self, name: &str) -> bool {
        self.removals.remove(name)
    }

    pub fn addition(&self, name: &str) -> Option<&ObjectId> {
        self.additions.get(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Blob staged under `oid`
    pub fn staged_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        self.staging.load_blob(oid)
    }

    /// Empty the staging area, including the staged blobs
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();

        self.staging.purge()
    }
}
