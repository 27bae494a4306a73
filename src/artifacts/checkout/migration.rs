//! Moving the working directory from one commit to another
//!
//! A migration compares the files tracked by the current commit with those
//! tracked by the target commit and plans one action per file:
//!
//! - `Add`: tracked only by the target
//! - `Modify`: tracked by both (always rewritten from the target's blob)
//! - `Delete`: tracked only by the current commit
//!
//! Untracked working files in the way are collected before anything is
//! touched, so a blocked checkout leaves the working directory as it was.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::core::errors::StateError;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Type of file system action required for checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Overwrite existing file
    Modify,
}

/// Planned actions grouped by type; deletions carry no blob
pub type ActionsSet = HashMap<ActionType, Vec<(String, Option<ObjectId>)>>;

/// Detected conflicts grouped by type
pub type ConflictsSet = BTreeMap<ConflictType, BTreeSet<String>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    index: &'r mut Index,
    current: &'r TrackedFiles,
    target: &'r TrackedFiles,
    inspector: Inspector<'r>,
    actions: ActionsSet,
    conflicts: ConflictsSet,
}

impl<'r> Migration<'r> {
    pub fn new(
        repository: &'r Repository,
        index: &'r mut Index,
        current: &'r TrackedFiles,
        target: &'r TrackedFiles,
    ) -> Self {
        let actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self {
            repository,
            index,
            current,
            target,
            inspector: Inspector::new(repository),
            actions,
            conflicts: ConflictsSet::new(),
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    /// Plan, check, then rewrite the working directory and empty the staging area
    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.update_workspace()?;
        self.update_index()?;

        Ok(())
    }

    fn plan_changes(&mut self) -> anyhow::Result<()> {
        let current = self.current;
        let target = self.target;

        for (file_name, oid) in target {
            self.check_for_conflict(file_name, true);

            let action = if current.contains_key(file_name) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            self.record_change(action, file_name, Some(oid.clone()));
        }

        for file_name in current.keys().filter(|name| !target.contains_key(*name)) {
            self.check_for_conflict(file_name, false);
            self.record_change(ActionType::Delete, file_name, None);
        }

        let blocked_files = self
            .conflicts
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>();

        if !blocked_files.is_empty() {
            for (conflict_type, files) in &self.conflicts {
                tracing::debug!(?files, "{}", conflict_type.description());
            }
            return Err(StateError::UntrackedFileConflict(blocked_files.into_iter().collect()).into());
        }

        tracing::debug!(
            add = self.actions[&ActionType::Add].len(),
            modify = self.actions[&ActionType::Modify].len(),
            delete = self.actions[&ActionType::Delete].len(),
            "planned checkout"
        );

        Ok(())
    }

    fn check_for_conflict(&mut self, file_name: &str, target_tracks_file: bool) {
        if self
            .inspector
            .is_untracked(file_name, self.current, self.index)
        {
            self.conflicts
                .entry(ConflictType::get_conflict_type(target_tracks_file))
                .or_default()
                .insert(file_name.to_string());
        }
    }

    fn record_change(&mut self, action: ActionType, file_name: &str, oid: Option<ObjectId>) {
        self.actions
            .entry(action)
            .or_default()
            .push((file_name.to_string(), oid));
    }

    fn update_workspace(&self) -> anyhow::Result<()> {
        self.repository.workspace().apply_migration(self)
    }

    fn update_index(&mut self) -> anyhow::Result<()> {
        self.index.clear()
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let blob = self.repository.database().load_blob(object_id)?;

        Ok(blob.content().clone())
    }
}
