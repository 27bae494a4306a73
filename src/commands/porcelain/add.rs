use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage the working versions of `file_names` for the next commit
    ///
    /// A file whose working version equals the one tracked by the current
    /// commit is unstaged instead, and any pending removal of it is dropped.
    pub async fn add(&mut self, file_names: &[String]) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;

        // read every file before staging anything
        let blobs = file_names
            .iter()
            .map(|file_name| Ok((file_name, self.workspace().parse_blob(file_name)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        for (file_name, blob) in blobs {
            index.unstage_removal(file_name);

            if head_commit.tracked_oid(file_name) == Some(&blob.object_id()?) {
                tracing::trace!(file = %file_name, "unchanged since the current commit");
                index.unstage_addition(file_name);
            } else {
                let oid = index.stage_addition(file_name, &blob)?;
                tracing::trace!(file = %file_name, %oid, "staged for addition");
            }
        }

        index.write_updates()?;

        Ok(())
    }
}
