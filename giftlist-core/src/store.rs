//! Durable storage for the serialized gift collection.
//!
//! A store holds exactly one document. It knows nothing about its contents.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

pub trait Store: Send + Sync {
    /// Read the stored document. `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored document.
    fn write(&self, document: &str) -> Result<(), StoreError>;
}

/// A single JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonFileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, document)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// Keeps the document in memory. Lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        MemoryStore {
            document: Mutex::new(Some(document.into())),
        }
    }

    /// The current document, if any.
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Store for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.document())
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        let mut slot = self
            .document
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        *slot = Some(document.to_string());
        Ok(())
    }
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        (**self).write(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_reads_nothing_before_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("gifts.json"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn file_store_creates_parent_dirs_and_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gifts.json");
        let store = JsonFileStore::new(&path);

        store.write("[1]").unwrap();
        store.write("[2]").unwrap();

        assert_eq!(store.read().unwrap().as_deref(), Some("[2]"));
        assert!(!dir.path().join("nested").join("gifts.json.tmp").exists());
    }

    #[test]
    fn file_store_surfaces_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        // The target path is an existing directory, so the rename fails.
        let path = dir.path().join("gifts.json");
        std::fs::create_dir(&path).unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.write("[]").is_err());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::with_document("[]");
        assert_eq!(store.read().unwrap().as_deref(), Some("[]"));
        store.write("[{}]").unwrap();
        assert_eq!(store.document().as_deref(), Some("[{}]"));
    }
}
