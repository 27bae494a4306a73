use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::FileChange;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;

// Terminology:
// - staged files: files staged for addition
// - removed files: tracked files staged for removal
// - modifications not staged: working versions that differ from what the next commit would record
// - untracked files: working files neither staged nor tracked, or staged for removal but present
impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status_info = Status::new(self).initialize(&index).await?;

        self.print_branches(&status_info)?;
        self.print_section(
            "Staged Files",
            status_info.staged_files.iter().map(|file| file.green().to_string()),
        )?;
        self.print_section(
            "Removed Files",
            status_info.removed_files.iter().map(|file| file.red().to_string()),
        )?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status_info
                .workspace_changeset
                .iter()
                .map(|(file_name, change)| {
                    FileChange {
                        file_name,
                        change: *change,
                    }
                    .to_string()
                }),
        )?;
        self.print_section(
            "Untracked Files",
            status_info.untracked_files.iter().map(|file| file.red().to_string()),
        )?;

        Ok(())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        self.print_section(
            "Branches",
            status_info.branches.iter().map(|branch| {
                if branch == &status_info.current_branch {
                    format!("*{}", branch).green().to_string()
                } else {
                    branch.to_string()
                }
            }),
        )
    }

    fn print_section(
        &self,
        title: &str,
        lines: impl Iterator<Item = String>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer(), "=== {} ===", title)?;
        for line in lines {
            writeln!(self.writer(), "{}", line)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
