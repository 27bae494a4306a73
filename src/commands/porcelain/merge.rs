use crate::areas::database::CommitCache;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::errors::StateError;
use crate::artifacts::merge::lca_finder::LCAFinder;
use crate::artifacts::merge::resolution::{
    MergeAction, MergeOutcome, conflict_content, plan_merge,
};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use bytes::Bytes;
use std::collections::BTreeMap;

impl Repository {
    /// Merge the tip of `given` into the current branch
    ///
    /// Every precondition is checked before the working directory, the
    /// staging area or any ref is touched.
    pub async fn merge(&mut self, given: &str) -> anyhow::Result<MergeOutcome> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        if !index.is_empty() {
            return Err(StateError::UncommittedChanges.into());
        }

        let given_branch = self.resolve_merge_branch(given)?;
        let given_oid = self
            .refs()
            .read_ref(&given_branch)?
            .ok_or_else(|| StateError::UnknownBranch(given.to_string()))?;
        let current_branch = self.refs().current_branch()?;

        if given_branch == current_branch {
            return Err(StateError::MergeWithSelf.into());
        }

        let (current_oid, current_commit) = self.head_commit()?;
        let given_commit = self.database().load_commit(&given_oid)?;
        let split_oid = self.merge_base(&current_oid, &given_oid)?;
        tracing::debug!(current = %current_oid, given = %given_oid, split = %split_oid, "merging");

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::AncestorNoop);
        }

        if split_oid == current_oid {
            let mut migration = Migration::new(
                self,
                &mut index,
                current_commit.tracked(),
                given_commit.tracked(),
            );
            migration.apply_changes()?;

            index.write_updates()?;
            self.refs().update_head(&given_oid)?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForward);
        }

        let split_commit = self.database().load_commit(&split_oid)?;
        let plan = plan_merge(
            split_commit.tracked(),
            current_commit.tracked(),
            given_commit.tracked(),
        );

        let inspector = Inspector::new(self);
        let blocked_files = plan
            .iter()
            .filter(|(_, action)| **action != MergeAction::KeepCurrent)
            .filter(|(file_name, _)| {
                inspector.is_untracked(file_name, current_commit.tracked(), &index)
            })
            .map(|(file_name, _)| file_name.clone())
            .collect::<Vec<_>>();

        if !blocked_files.is_empty() {
            return Err(StateError::UntrackedFileConflict(blocked_files).into());
        }

        let has_conflicts = self.apply_merge_plan(&plan, &mut index)?;

        let message = format!("Merged {} into {}", given_branch, current_branch);
        let (merge_oid, _) = self.write_commit(&mut index, message, Some(given_oid))?;

        if has_conflicts {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
            Ok(MergeOutcome::Conflict(merge_oid))
        } else {
            Ok(MergeOutcome::MergeCommit(merge_oid))
        }
    }

    /// Print the split point of the current branch and `given`
    pub fn mergebase(&mut self, given: &str) -> anyhow::Result<()> {
        let given_branch = self.resolve_merge_branch(given)?;
        let given_oid = self
            .refs()
            .read_ref(&given_branch)?
            .ok_or_else(|| StateError::UnknownBranch(given.to_string()))?;
        let current_oid = self.refs().read_head()?;

        let split_oid = self.merge_base(&current_oid, &given_oid)?;
        writeln!(self.writer(), "{}", split_oid)?;

        Ok(())
    }

    /// Lowest common ancestor of two commits
    pub fn merge_base(&self, source: &ObjectId, target: &ObjectId) -> anyhow::Result<ObjectId> {
        let commit_cache = CommitCache::new();
        let finder = LCAFinder::new(|oid: &ObjectId| {
            commit_cache.get_or_load_slim_commit(self.database(), oid)
        });

        finder
            .find_lowest_common_ancestor(source, target)?
            .ok_or_else(|| StateError::NoCommonAncestor(source.clone(), target.clone()).into())
    }

    fn resolve_merge_branch(&self, given: &str) -> anyhow::Result<BranchName> {
        BranchName::try_parse(given.to_string())
            .map_err(|_| StateError::UnknownBranch(given.to_string()).into())
    }

    /// Update the working directory and staging area per file; returns whether
    /// any file conflicted
    fn apply_merge_plan(
        &self,
        plan: &BTreeMap<String, MergeAction>,
        index: &mut Index,
    ) -> anyhow::Result<bool> {
        let mut has_conflicts = false;

        for (file_name, action) in plan {
            match action {
                MergeAction::KeepCurrent => {}
                MergeAction::TakeGiven(oid) => {
                    let blob = self.database().load_blob(oid)?;
                    self.workspace().write_file(file_name, blob.content())?;
                    index.stage_addition(file_name, &blob)?;
                }
                MergeAction::Remove => {
                    self.workspace().delete_file(file_name)?;
                    index.stage_removal(file_name);
                }
                MergeAction::Conflict { current, given } => {
                    let content = conflict_content(
                        &self.blob_content_or_empty(current.as_ref())?,
                        &self.blob_content_or_empty(given.as_ref())?,
                    );
                    self.workspace().write_file(file_name, &content)?;
                    index.stage_addition(file_name, &Blob::new(content))?;
                    has_conflicts = true;
                }
            }
            tracing::trace!(file = %file_name, ?action, "merged file");
        }

        Ok(has_conflicts)
    }

    fn blob_content_or_empty(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => Ok(self.database().load_blob(oid)?.content().clone()),
            None => Ok(Bytes::new()),
        }
    }
}
