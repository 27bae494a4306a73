//! Commit object
//!
//! Commits are immutable snapshots of the tracked file set. They contain:
//! - Up to two parent commit IDs (the second one only for merge commits)
//! - A timestamp with its UTC offset
//! - The tracked files, mapping each filename to a blob ID
//! - A message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <first-parent-sha>
//! parent <second-parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <filename>
//!
//! <commit message>
//! ```
//!
//! Tracked files are kept in a `BTreeMap`, so `file` lines are always written in
//! filename order and the commit ID never depends on the order files were added.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SubsecRound};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "BITLET_COMMIT_DATE";

/// Message of the root commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Filename to blob ID, ordered by filename
pub type TrackedFiles = BTreeMap<String, ObjectId>;

/// Slim representation of a commit
///
/// Contains only what the ancestor search needs, so the search can run over a
/// cache instead of re-reading full commits.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    tracked: TrackedFiles,
    parent: Option<ObjectId>,
    parent2: Option<ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        tracked: TrackedFiles,
        parent: Option<ObjectId>,
        parent2: Option<ObjectId>,
    ) -> Self {
        Commit {
            message,
            // only whole seconds are persisted
            timestamp: timestamp.trunc_subsecs(0),
            tracked,
            parent,
            parent2,
        }
    }

    /// The sentinel every history starts from: fixed message, the Unix epoch,
    /// nothing tracked and no parents. Its ID is the same in every repository.
    pub fn root() -> Self {
        Commit {
            message: ROOT_COMMIT_MESSAGE.to_string(),
            timestamp: DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            tracked: TrackedFiles::new(),
            parent: None,
            parent2: None,
        }
    }

    /// Timestamp for a new commit
    ///
    /// Reads `BITLET_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) if set,
    /// otherwise uses the local time.
    pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date_str}")),
            Err(_) => Ok(chrono::Local::now().fixed_offset()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Timestamp as shown by `log`, e.g. "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    pub fn tracked_oid(&self, file_name: &str) -> Option<&ObjectId> {
        self.tracked.get(file_name)
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent.iter().chain(self.parent2.iter()).cloned().collect()
    }

    pub fn is_merge(&self) -> bool {
        self.parent2.is_some()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents(),
        }
    }

    fn body(&self) -> String {
        let mut lines = vec![];

        for parent in self.parent.iter().chain(self.parent2.iter()) {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (file_name, oid) in &self.tracked {
            lines.push(format!("file {oid} {file_name}"));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: invalid timestamp line")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;

        let offset = *DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .context("Invalid commit object: invalid timezone")?
        .offset();

        Ok(DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: timestamp out of range")?
            .with_timezone(&offset))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(frame(&self.object_type(), self.body().as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut tracked = TrackedFiles::new();

        for line in headers.lines() {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(value) = line.strip_prefix("timestamp ") {
                timestamp = Some(Self::parse_timestamp(value)?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, file_name) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                tracked.insert(file_name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line '{line}'");
            }
        }

        if parents.len() > 2 {
            anyhow::bail!("Invalid commit object: too many parents");
        }
        let mut parents = parents.into_iter();

        Ok(Commit {
            message: message.to_string(),
            timestamp: timestamp.context("Invalid commit object: missing timestamp line")?,
            tracked,
            parent: parents.next(),
            parent2: parents.next(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body()
    }
}
