use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::StateError;

impl Repository {
    /// Create `branch_name` pointing at the current commit; HEAD does not move
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let source_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &source_oid)?;

        Ok(())
    }

    /// Delete the pointer of `branch_name`; its commits stay in the store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| StateError::UnknownBranch(branch_name.to_string()))?;

        if self.refs().current_branch()? == branch_name {
            return Err(StateError::RemoveCurrentBranch(branch_name.to_string()).into());
        }

        let oid = self.refs().delete_branch(&branch_name)?;
        tracing::debug!(branch = %branch_name, %oid, "deleted branch");

        Ok(())
    }
}
