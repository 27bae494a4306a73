use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Check out the files of an arbitrary commit and move the current branch to it
    pub async fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target_oid = Revision::parse(commit_id).resolve(self)?;

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
        self.refs().update_head(&target_oid)?;

        Ok(())
    }
}
