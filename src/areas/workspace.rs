use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::core::errors::StateError;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".bitlet", ".", ".."];

/// The working directory
///
/// Only plain files directly inside the working directory are versioned;
/// subdirectories and the repository directory are never listed.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `file_name` names a plain file directly inside the working
    /// directory
    ///
    /// Commit objects store one filename per line, so control characters are
    /// rejected along with separators and the repository directory.
    pub fn is_valid_file_name(file_name: &str) -> bool {
        if file_name.contains('/') || file_name.chars().any(char::is_control) {
            return false;
        }

        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => {
                !IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            }
            _ => false,
        }
    }

    pub fn exists(&self, file_name: &str) -> bool {
        Self::is_valid_file_name(file_name) && self.path.join(file_name).is_file()
    }

    pub fn parse_blob(&self, file_name: &str) -> anyhow::Result<Blob> {
        let data = self.read_file(file_name)?;
        Ok(Blob::new(data))
    }

    /// Names of the plain files in the working directory, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| Self::is_valid_file_name(name))
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        if !Self::is_valid_file_name(file_name) {
            return Err(StateError::FileNotFound(file_name.to_string()).into());
        }

        let file_path = self.path.join(file_name);

        match std::fs::read(&file_path) {
            Ok(content) => Ok(Bytes::from(content)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(StateError::FileNotFound(file_name.to_string()).into())
            }
            Err(error) => Err(error)
                .with_context(|| format!("Failed to read file: {:?}", file_path)),
        }
    }

    pub fn write_file(&self, file_name: &str, data: &[u8]) -> anyhow::Result<()> {
        anyhow::ensure!(
            Self::is_valid_file_name(file_name),
            "Refusing to write outside the working directory: {file_name:?}"
        );
        let file_path = self.path.join(file_name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        tracing::trace!(file = file_name, bytes = data.len(), "wrote working file");
        Ok(())
    }

    /// Delete `file_name` if it exists
    pub fn delete_file(&self, file_name: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            Self::is_valid_file_name(file_name),
            "Refusing to delete outside the working directory: {file_name:?}"
        );
        let file_path = self.path.join(file_name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
            tracing::trace!(file = file_name, "deleted working file");
        }

        Ok(())
    }

    // Deletions go first so a later write never races a stale file.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        self.apply_migration_action_set(migration, ActionType::Delete)?;
        self.apply_migration_action_set(migration, ActionType::Modify)?;
        self.apply_migration_action_set(migration, ActionType::Add)?;

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        let Some(changes) = migration.actions().get(&action) else {
            return Ok(());
        };

        for (file_name, oid) in changes {
            match (&action, oid) {
                (ActionType::Delete, None) => self.delete_file(file_name)?,
                (ActionType::Add | ActionType::Modify, Some(oid)) => {
                    let data = migration.load_blob_data(oid)?;
                    self.write_file(file_name, &data)?;
                }
                _ => anyhow::bail!("Invalid action and entry combination for {file_name}"),
            }
        }

        Ok(())
    }
}
