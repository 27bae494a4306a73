//! Three-way classification of the files touched by a merge
//!
//! Every filename tracked by the split point, the current tip or the given
//! tip is compared by blob ID across the three commits. A side "changed" a
//! file when its version differs from the split point's, absence included.

use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeMap;

pub const CONFLICT_START_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

/// What a merge does with one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Leave the current version (or absence) as it is
    KeepCurrent,
    /// Only the given side changed the file: check out and stage its version
    TakeGiven(ObjectId),
    /// Only the given side deleted the file: delete and stage the removal
    Remove,
    /// Both sides changed the file differently
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

impl MergeAction {
    pub fn classify(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> MergeAction {
        if current == given {
            MergeAction::KeepCurrent
        } else if split == current {
            match given {
                Some(given) => MergeAction::TakeGiven(given.clone()),
                None => MergeAction::Remove,
            }
        } else if split == given {
            MergeAction::KeepCurrent
        } else {
            MergeAction::Conflict {
                current: current.cloned(),
                given: given.cloned(),
            }
        }
    }
}

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given tip is already in the current history
    AncestorNoop,
    /// The current tip was behind and now points at the given tip
    FastForward,
    /// A merge commit was written
    MergeCommit(ObjectId),
    /// A merge commit was written, with conflict-marked files
    Conflict(ObjectId),
}

/// Every file of a true merge with the action taken on it, by filename
pub fn plan_merge(
    split: &TrackedFiles,
    current: &TrackedFiles,
    given: &TrackedFiles,
) -> BTreeMap<String, MergeAction> {
    split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .map(|file_name| {
            let action = MergeAction::classify(
                split.get(file_name),
                current.get(file_name),
                given.get(file_name),
            );
            (file_name.clone(), action)
        })
        .collect()
}

/// Content written for a conflicted file
///
/// Both versions are copied verbatim (an absent side is empty); no newline is
/// added after a version that lacks one.
pub fn conflict_content(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(
        CONFLICT_START_MARKER.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + given.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.extend_from_slice(CONFLICT_START_MARKER.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(given);
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    Bytes::from(content)
}
