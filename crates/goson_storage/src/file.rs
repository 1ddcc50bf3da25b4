//! File-based storage backend for persistent storage.

use crate::backend::{DirStatus, StorageBackend};
use crate::error::{StorageError, StorageResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension of table files inside a database directory.
pub const TABLE_EXTENSION: &str = "json";

/// A file-based storage backend.
///
/// Each name maps to `<root>/<name>.json`. Data survives process restarts.
///
/// # Durability
///
/// `write` stages the new content in a temporary sibling file and renames
/// it over the target, so a reader sees either the old or the new content.
/// With `sync_on_write` enabled the staged file is fsynced before the rename.
///
/// # Example
///
/// ```no_run
/// use goson_storage::{FileBackend, StorageBackend};
///
/// let backend = FileBackend::new("shop");
/// backend.create_root().unwrap();
/// backend.write("orders", b"{\"data\":[]}").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
    sync_on_write: bool,
}

impl FileBackend {
    /// Creates a backend for the given database directory.
    ///
    /// Nothing is touched on disk until an operation runs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sync_on_write: false,
        }
    }

    /// Sets whether every write is fsynced before it becomes visible.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the database directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the file backing `name`.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{TABLE_EXTENSION}"))
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        self.root.join(format!(".{name}.{TABLE_EXTENSION}.tmp"))
    }

    fn require_root(&self) -> StorageResult<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(StorageError::RootMissing {
                root: self.location(),
            })
        }
    }
}

impl StorageBackend for FileBackend {
    fn create_root(&self) -> StorageResult<DirStatus> {
        if self.root.is_dir() {
            return Ok(DirStatus::AlreadyExisted);
        }
        fs::create_dir_all(&self.root)?;
        Ok(DirStatus::Created)
    }

    fn root_exists(&self) -> StorageResult<bool> {
        Ok(self.root.is_dir())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.file_path(name).is_file())
    }

    fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        match fs::read(self.file_path(name)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        self.require_root()?;

        let temp_path = self.temp_path(name);
        let mut file = File::create(&temp_path)?;
        let written = write_contents(&mut file, data, self.sync_on_write);
        drop(file);
        discard_on_error(&temp_path, written)?;

        discard_on_error(&temp_path, fs::rename(&temp_path, self.file_path(name)))
    }

    fn create_new(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        self.require_root()?;

        let path = self.file_path(name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists {
                    name: name.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let written = write_contents(&mut file, data, self.sync_on_write);
        drop(file);
        discard_on_error(&path, written)
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

fn write_contents(file: &mut File, data: &[u8], sync: bool) -> io::Result<()> {
    file.write_all(data)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

/// Removes the partially written file at `path` when `result` is an error.
fn discard_on_error(path: &Path, result: io::Result<()>) -> StorageResult<()> {
    result.map_err(|e| {
        let _ = fs::remove_file(path);
        StorageError::from(e)
    })
}
