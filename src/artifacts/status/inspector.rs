use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// ID the working copy of `file_name` would get, `None` if it is missing
    pub fn workspace_oid(&self, file_name: &str) -> anyhow::Result<Option<ObjectId>> {
        if !self.repository.workspace().exists(file_name) {
            return Ok(None);
        }

        let blob = self.repository.workspace().parse_blob(file_name)?;
        Ok(Some(blob.object_id()?))
    }

    /// Whether a present working file is untracked
    ///
    /// A file is untracked when the current commit does not track it and it is
    /// not staged for addition, or when it is staged for removal but still
    /// present.
    pub fn is_untracked(&self, file_name: &str, tracked: &TrackedFiles, index: &Index) -> bool {
        if !self.repository.workspace().exists(file_name) {
            return false;
        }

        (!tracked.contains_key(file_name) && index.addition(file_name).is_none())
            || index.is_staged_for_removal(file_name)
    }

    /// Compare the working copy of `file_name` against `expected`
    pub fn check_against_workspace(
        &self,
        file_name: &str,
        expected: &ObjectId,
    ) -> anyhow::Result<WorkspaceChangeType> {
        match self.workspace_oid(file_name)? {
            None => Ok(WorkspaceChangeType::Deleted),
            Some(oid) if &oid != expected => Ok(WorkspaceChangeType::Modified),
            Some(_) => Ok(WorkspaceChangeType::None),
        }
    }
}
