//! Board files on disk.

use crate::error::BoardError;
use crate::format::{BoardFile, ImportedBoard};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error(transparent)]
    Import(#[from] BoardError),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Write a board file as pretty JSON.
pub fn write_board(path: &Path, file: &BoardFile) -> StorageResult<()> {
    let json = file
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Saved board with {} items to {}", file.items.len(), path.display());
    Ok(())
}

/// Read and validate a board file in either format.
pub fn read_board(path: &Path) -> StorageResult<ImportedBoard> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(BoardFile::parse(&json)?)
}

/// A directory of named boards stored as `{name}.json`.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open a storage directory, creating it if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// File path for a board name.
    pub fn board_path(&self, name: &str) -> PathBuf {
        let safe: String = name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn save(&self, name: &str, file: &BoardFile) -> StorageResult<()> {
        write_board(&self.board_path(name), file)
    }

    pub fn load(&self, name: &str) -> StorageResult<ImportedBoard> {
        let path = self.board_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        read_board(&path)
    }

    pub fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.board_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)
            .map_err(|e| StorageError::Io(format!("Failed to delete {}: {}", path.display(), e)))
    }

    /// Names of stored boards, sorted.
    pub fn list(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem().map(|s| s.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("boards")).unwrap();

        let file = demo::demo_board();
        storage.save("match day", &file).unwrap();
        assert!(dir.path().join("boards/match_day.json").exists());

        let loaded = storage.load("match day").unwrap();
        assert_eq!(loaded.tokens.len(), file.items.len());
        assert_eq!(storage.list().unwrap(), vec!["match_day".to_string()]);

        storage.delete("match day").unwrap();
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_missing_board() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(matches!(storage.load("nope"), Err(StorageError::NotFound(_))));
        assert!(matches!(
            read_board(&dir.path().join("nope.json")),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"items": 3}"#).unwrap();
        assert!(matches!(
            read_board(&path),
            Err(StorageError::Import(BoardError::MalformedImport(_)))
        ));
    }
}
