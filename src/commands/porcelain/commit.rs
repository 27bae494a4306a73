use crate::areas::repository::Repository;
use crate::artifacts::core::errors::StateError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.trim().is_empty() {
            return Err(StateError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if index.is_empty() {
            return Err(StateError::NothingToCommit.into());
        }

        let (commit_id, commit) = self.write_commit(&mut index, message.to_string(), None)?;
        let branch_name = self.refs().current_branch()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch_name,
            commit_id.to_short_oid(),
            commit.message()
        )?;

        Ok(())
    }
}
