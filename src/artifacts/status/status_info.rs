use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

/// Everything `status` reports, each section already sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub async fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let inspector = Inspector::new(self.repository);
        let (_, head_commit) = self.repository.head_commit()?;
        let tracked = head_commit.tracked();

        let workspace_changeset = self.collect_workspace_changes(tracked, index, &inspector)?;
        let untracked_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|file_name| inspector.is_untracked(file_name, tracked, index))
            .collect::<BTreeSet<_>>();

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }

    fn collect_workspace_changes(
        &self,
        tracked: &TrackedFiles,
        index: &Index,
        inspector: &Inspector<'_>,
    ) -> anyhow::Result<ChangeSet> {
        let mut changeset = ChangeSet::new();

        // staged versions that no longer match the working copy
        for (file_name, staged_oid) in index.additions() {
            let change = inspector.check_against_workspace(file_name, staged_oid)?;
            if change != WorkspaceChangeType::None {
                changeset.insert(file_name.clone(), change);
            }
        }

        for (file_name, tracked_oid) in tracked {
            if index.addition(file_name).is_some() {
                continue;
            }

            match inspector.check_against_workspace(file_name, tracked_oid)? {
                WorkspaceChangeType::Modified => {
                    changeset.insert(file_name.clone(), WorkspaceChangeType::Modified);
                }
                WorkspaceChangeType::Deleted if !index.is_staged_for_removal(file_name) => {
                    changeset.insert(file_name.clone(), WorkspaceChangeType::Deleted);
                }
                _ => {}
            }
        }

        tracing::trace!(changes = changeset.len(), "collected unstaged changes");
        Ok(changeset)
    }
}
