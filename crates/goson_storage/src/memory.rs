//! In-memory storage backend for testing.

use crate::backend::{DirStatus, StorageBackend};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory storage backend.
///
/// The directory is modelled explicitly: until [`StorageBackend::create_root`]
/// runs, writes fail with [`StorageError::RootMissing`] exactly like the file
/// backend does. Suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral databases that don't need persistence
///
/// # Example
///
/// ```rust
/// use goson_storage::{InMemoryBackend, StorageBackend};
///
/// let backend = InMemoryBackend::with_root();
/// backend.write("notes", b"[]").unwrap();
/// assert!(backend.exists("notes").unwrap());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    files: RwLock<Option<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBackend {
    /// Creates a backend whose directory does not exist yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose directory already exists and is empty.
    #[must_use]
    pub fn with_root() -> Self {
        Self {
            files: RwLock::new(Some(HashMap::new())),
        }
    }

    /// Returns the names of all stored files, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .read()
            .as_ref()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn root_missing() -> StorageError {
        StorageError::RootMissing {
            root: "<memory>".to_string(),
        }
    }
}

impl StorageBackend for InMemoryBackend {
    fn create_root(&self) -> StorageResult<DirStatus> {
        let mut files = self.files.write();
        if files.is_some() {
            return Ok(DirStatus::AlreadyExisted);
        }
        *files = Some(HashMap::new());
        Ok(DirStatus::Created)
    }

    fn root_exists(&self) -> StorageResult<bool> {
        Ok(self.files.read().is_some())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self
            .files
            .read()
            .as_ref()
            .is_some_and(|files| files.contains_key(name)))
    }

    fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.files
            .read()
            .as_ref()
            .and_then(|files| files.get(name).cloned())
            .ok_or_else(|| StorageError::NotFound {
                name: name.to_string(),
            })
    }

    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let mut files = self.files.write();
        let files = files.as_mut().ok_or_else(Self::root_missing)?;
        files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn create_new(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let mut files = self.files.write();
        let files = files.as_mut().ok_or_else(Self::root_missing)?;
        if files.contains_key(name) {
            return Err(StorageError::AlreadyExists {
                name: name.to_string(),
            });
        }
        files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
