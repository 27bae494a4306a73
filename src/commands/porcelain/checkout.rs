use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::errors::StateError;

impl Repository {
    /// Overwrite the working copy of `file_name` with its version in `revision`
    /// (the current commit when `None`), leaving the staging area alone
    pub async fn checkout_file(
        &mut self,
        revision: Option<&str>,
        file_name: &str,
    ) -> anyhow::Result<()> {
        let revision = revision.map(Revision::parse).unwrap_or(Revision::Head);
        let commit_oid = revision.resolve(self)?;
        let commit = self.database().load_commit(&commit_oid)?;

        let blob_oid = commit
            .tracked_oid(file_name)
            .ok_or_else(|| StateError::FileNotInCommit(file_name.to_string()))?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(file_name, blob.content())?;
        tracing::debug!(file = file_name, commit = %commit_oid, "restored file");

        Ok(())
    }

    /// Switch the working directory and HEAD to the tip of `target`
    pub async fn checkout_branch(&mut self, target: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(target.to_string())
            .map_err(|_| StateError::NoSuchBranch(target.to_string()))?;
        let target_oid = self
            .refs()
            .read_ref(&branch_name)?
            .ok_or_else(|| StateError::NoSuchBranch(target.to_string()))?;

        if self.refs().current_branch()? == branch_name {
            return Err(StateError::AlreadyOnBranch(target.to_string()).into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        let target_commit = self.database().load_commit(&target_oid)?;

        let mut migration = Migration::new(
            self,
            &mut index,
            head_commit.tracked(),
            target_commit.tracked(),
        );
        migration.apply_changes()?;

        index.write_updates()?;
        self.refs().set_head(&branch_name)?;

        tracing::info!(branch = %branch_name, "switched branch");

        Ok(())
    }
}
