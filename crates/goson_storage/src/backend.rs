//! Storage backend trait definition.

use crate::error::StorageResult;
use std::fmt::Debug;

/// Outcome of creating a database directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    /// The directory did not exist and was created.
    Created,
    /// The directory was already there; nothing was changed.
    AlreadyExisted,
}

/// A whole-file byte store rooted at one database directory.
///
/// Backends are **opaque byte stores**. Names passed in are already
/// normalized by the caller; a backend only maps a name to a location.
///
/// # Invariants
///
/// - `read` returns exactly the bytes of the last successful `write`
///   or `create_new` for that name
/// - `create_new` never replaces an existing file
/// - A failed `write` leaves the previous content readable
pub trait StorageBackend: Send + Sync + Debug {
    /// Creates the database directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_root(&self) -> StorageResult<DirStatus>;

    /// Returns whether the database directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file system cannot be queried.
    fn root_exists(&self) -> StorageResult<bool>;

    /// Returns whether a file with this name exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file system cannot be queried.
    fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Reads the full content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] if the file is missing.
    fn read(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Replaces the content of a file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing or the write fails.
    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Creates a file that must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::AlreadyExists`] if the file is present.
    fn create_new(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Human-readable location of the database directory, for messages.
    fn location(&self) -> String;
}
