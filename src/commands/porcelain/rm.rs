use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::errors::StateError;

impl Repository {
    /// Unstage `file_name`, and if the current commit tracks it, stage its
    /// removal and delete it from the working directory
    pub async fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        if !Workspace::is_valid_file_name(file_name) {
            return Err(StateError::NothingToRemove(file_name.to_string()).into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        let is_staged = index.addition(file_name).is_some();
        let is_tracked = head_commit.tracked_oid(file_name).is_some();

        if !is_staged && !is_tracked {
            return Err(StateError::NothingToRemove(file_name.to_string()).into());
        }

        if is_staged {
            index.unstage_addition(file_name);
        }

        if is_tracked {
            index.stage_removal(file_name);
            self.workspace().delete_file(file_name)?;
        }

        index.write_updates()?;

        Ok(())
    }
}
