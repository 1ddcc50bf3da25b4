//! Table file lifecycle.
//!
//! A table is one file inside the database directory:
//!
//! ```text
//! <database>/
//! ├─ users.json        # {"data": [ {...}, {...} ]}
//! └─ orders.json
//! ```
//!
//! Every operation reads or writes the whole record list. The store does
//! no locking of its own; callers hold the database lock around a
//! load-mutate-save sequence.

use crate::error::{CoreError, CoreResult, ObjectKind};
use goson_codec::RecordFile;
use goson_storage::{DirStatus, StorageBackend, StorageError};
use tracing::debug;

/// Normalizes a table name to the name of its file.
///
/// Names are lower-cased. Empty names and names that could escape the
/// database directory are rejected.
///
/// # Errors
///
/// Returns [`CoreError::InvalidName`] for unusable names.
pub fn normalize_table_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    let unusable = trimmed.is_empty()
        || trimmed.contains(['/', '\\', '\0'])
        || trimmed == "."
        || trimmed.contains("..");
    if unusable {
        return Err(CoreError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(trimmed.to_lowercase())
}

/// Reads and writes table files through a storage backend.
#[derive(Debug, Clone, Copy)]
pub struct TableStore<'a> {
    backend: &'a dyn StorageBackend,
    pretty: bool,
}

impl<'a> TableStore<'a> {
    /// Creates a store over `backend`.
    pub fn new(backend: &'a dyn StorageBackend, pretty: bool) -> Self {
        Self { backend, pretty }
    }

    /// Creates a table holding an empty record list.
    ///
    /// The database directory is created first if it is missing; the
    /// returned status says which case applied.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlreadyExists`] if the table file is present.
    pub fn create(&self, table: &str) -> CoreResult<DirStatus> {
        let status = self.backend.create_root()?;
        let bytes = goson_codec::encode(&RecordFile::new(), self.pretty)?;

        match self.backend.create_new(table, &bytes) {
            Ok(()) => Ok(status),
            Err(StorageError::AlreadyExists { .. }) => Err(CoreError::AlreadyExists {
                kind: ObjectKind::Table,
                name: table.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns whether the table file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    pub fn exists(&self, table: &str) -> CoreResult<bool> {
        Ok(self.backend.exists(table)?)
    }

    /// Loads the full record list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TableNotFound`] if the file is missing or does
    /// not decode; other storage failures are passed through.
    pub fn load(&self, table: &str) -> CoreResult<RecordFile> {
        let bytes = match self.backend.read(table) {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => {
                return Err(CoreError::TableNotFound {
                    table: table.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let file = goson_codec::decode(&bytes).map_err(|e| {
            debug!(table, error = %e, "table file does not decode");
            CoreError::TableNotFound {
                table: table.to_string(),
            }
        })?;
        debug!(table, records = file.len(), "loaded table");
        Ok(file)
    }

    /// Serializes the full record list and replaces the table file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Save`] wrapping the codec or storage failure.
    pub fn save(&self, table: &str, file: &RecordFile) -> CoreResult<()> {
        let bytes = goson_codec::encode(file, self.pretty)
            .map_err(|e| CoreError::save(table, e.into()))?;
        self.backend
            .write(table, &bytes)
            .map_err(|e| CoreError::save(table, e.into()))?;
        debug!(table, records = file.len(), bytes = bytes.len(), "saved table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goson_codec::{Record, Value};
    use goson_storage::InMemoryBackend;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, got {other}"),
        }
    }

    #[test]
    fn names_are_lowercased() {
        assert_eq!(normalize_table_name("Users").unwrap(), "users");
        assert_eq!(normalize_table_name(" ORDERS ").unwrap(), "orders");
    }

    #[test]
    fn unusable_names_are_rejected() {
        for name in ["", "  ", "a/b", "a\\b", "..", "../etc", "."] {
            assert!(
                matches!(normalize_table_name(name), Err(CoreError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn create_makes_directory_and_empty_table() {
        let backend = InMemoryBackend::new();
        let store = TableStore::new(&backend, true);

        assert_eq!(store.create("users").unwrap(), DirStatus::Created);
        assert_eq!(store.create("orders").unwrap(), DirStatus::AlreadyExisted);
        assert!(store.load("users").unwrap().is_empty());
    }

    #[test]
    fn create_twice_fails() {
        let backend = InMemoryBackend::with_root();
        let store = TableStore::new(&backend, false);

        store.create("users").unwrap();
        let result = store.create("users");
        assert!(matches!(
            result,
            Err(CoreError::AlreadyExists {
                kind: ObjectKind::Table,
                ..
            })
        ));
    }

    #[test]
    fn load_missing_is_not_found() {
        let backend = InMemoryBackend::with_root();
        let store = TableStore::new(&backend, false);

        let result = store.load("ghost");
        assert!(matches!(result, Err(CoreError::TableNotFound { .. })));
    }

    #[test]
    fn load_malformed_is_not_found() {
        let backend = InMemoryBackend::with_root();
        backend.write("broken", b"{\"data\": oops").unwrap();
        let store = TableStore::new(&backend, false);

        let result = store.load("broken");
        assert!(matches!(result, Err(CoreError::TableNotFound { .. })));
    }

    #[test]
    fn save_then_load() {
        let backend = InMemoryBackend::with_root();
        let store = TableStore::new(&backend, true);

        let file = RecordFile::from(vec![record(json!({"id": 1, "name": "ada"}))]);
        store.save("users", &file).unwrap();
        assert_eq!(store.load("users").unwrap(), file);
        assert!(store.exists("users").unwrap());
    }

    #[test]
    fn save_without_directory_fails() {
        let backend = InMemoryBackend::new();
        let store = TableStore::new(&backend, true);

        let result = store.save("users", &RecordFile::new());
        assert!(matches!(result, Err(CoreError::Save { .. })));
    }
}
