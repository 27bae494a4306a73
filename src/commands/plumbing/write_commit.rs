use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Record the staged changes as a child of the current commit
    ///
    /// The new commit tracks what the current commit tracks, updated by the
    /// staged additions and without the staged removals. Staged blobs are
    /// promoted to the object store, HEAD's branch moves to the new commit and
    /// the staging area is emptied.
    pub fn write_commit(
        &self,
        index: &mut Index,
        message: String,
        parent2: Option<ObjectId>,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        let (head_oid, head_commit) = self.head_commit()?;
        let mut tracked = head_commit.tracked().clone();

        for (file_name, blob_oid) in index.additions() {
            if !self.database().exists(blob_oid) {
                let blob = index.staged_blob(blob_oid)?;
                self.database().store(&blob)?;
            }
            tracked.insert(file_name.clone(), blob_oid.clone());
        }

        for file_name in index.removals() {
            if tracked.remove(file_name).is_none() {
                tracing::warn!(file = %file_name, "staged removal of a file the current commit does not track");
            }
        }

        let commit = Commit::new(
            message,
            Commit::timestamp_from_env()?,
            tracked,
            Some(head_oid),
            parent2,
        );
        let commit_oid = self.database().store(&commit)?;

        self.refs().update_head(&commit_oid)?;
        tracing::info!(commit = %commit_oid, files = commit.tracked().len(), "wrote commit");

        index.clear()?;
        index.write_updates()?;

        Ok((commit_oid, commit))
    }
}
