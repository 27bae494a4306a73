use colored::Colorize;

/// How a working file differs from the version the next commit would record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WorkspaceChangeType {
    #[default]
    None,
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::None => "",
            WorkspaceChangeType::Modified => " (modified)",
            WorkspaceChangeType::Deleted => " (deleted)",
        }
    }
}

impl std::fmt::Display for WorkspaceChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        write!(f, "{}", label)
    }
}

/// A modified-but-unstaged entry as printed by `status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange<'f> {
    pub(crate) file_name: &'f str,
    pub(crate) change: WorkspaceChangeType,
}

impl std::fmt::Display for FileChange<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_name.red(), self.change)
    }
}
