//! Database facade.

use crate::config::Config;
use crate::error::{CoreError, CoreResult, ObjectKind};
use crate::filter::Filter;
use crate::merge::merge;
use crate::schema::{Fields, Structured};
use crate::table::{normalize_table_name, TableStore};
use goson_codec::{Record, RecordFile};
use goson_storage::{DirStatus, FileBackend, InMemoryBackend, StorageBackend};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The main database handle.
///
/// A `Database` names one directory of table files. Every operation takes
/// the handle's lock for its whole duration, loads the table, mutates it in
/// memory and writes it back, so within one process no two operations
/// interleave.
///
/// The lock is an explicit value: handles created separately do not block
/// each other unless they share a lock through [`Database::with_lock`].
///
/// # Example
///
/// ```rust,no_run
/// use goson_core::{Database, Structured};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Structured for User {
///     const NOT_NULL: &'static [&'static str] = &["name"];
/// }
///
/// #[derive(Serialize, Default)]
/// struct UserFilter {
///     name: Option<String>,
///     age: Option<u32>,
/// }
///
/// let db = Database::new("shop");
/// db.create_database()?;
/// db.create_table("Users")?;
/// db.add_data("users", &User { name: "Ada".into(), age: 36 })?;
///
/// let ada = db.find_one("users", &UserFilter { name: Some("Ada".into()), ..Default::default() })?;
/// assert_eq!(ada["age"], 36);
/// # Ok::<(), goson_core::CoreError>(())
/// ```
#[derive(Debug)]
pub struct Database {
    /// Configuration.
    config: Config,
    /// Byte store for the database directory.
    backend: Box<dyn StorageBackend>,
    /// Serializes all operations on this handle.
    lock: Arc<Mutex<()>>,
}

impl Database {
    /// Creates a handle for the database directory at `path`.
    ///
    /// Nothing is read or created until an operation runs.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_config(path, Config::default())
    }

    /// Creates a handle with custom configuration.
    pub fn with_config(path: impl AsRef<Path>, config: Config) -> Self {
        let backend = FileBackend::new(path.as_ref()).sync_on_write(config.sync_on_write);
        Self::with_backend(Box::new(backend), config)
    }

    /// Creates a handle over a pre-configured backend.
    pub fn with_backend(backend: Box<dyn StorageBackend>, config: Config) -> Self {
        Self {
            config,
            backend,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a handle over a fresh in-memory directory that does not
    /// exist yet.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(InMemoryBackend::new()), Config::default())
    }

    /// Replaces this handle's lock with a shared one.
    ///
    /// Handles sharing a lock serialize against each other, which
    /// reproduces a single process-wide writer across several databases.
    #[must_use]
    pub fn with_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.lock = lock;
        self
    }

    /// Returns the lock guarding this handle, for sharing.
    #[must_use]
    pub fn lock_handle(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.lock)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Human-readable location of the database directory.
    #[must_use]
    pub fn location(&self) -> String {
        self.backend.location()
    }

    fn store(&self) -> TableStore<'_> {
        TableStore::new(self.backend.as_ref(), self.config.pretty)
    }

    /// Creates the database directory.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlreadyExists`] if the directory is present.
    pub fn create_database(&self) -> CoreResult<String> {
        let _guard = self.lock.lock();
        let location = self.backend.location();

        match self.backend.create_root()? {
            DirStatus::Created => {
                info!(database = %location, "database created");
                Ok(format!("database {location} created successfully"))
            }
            DirStatus::AlreadyExisted => Err(CoreError::AlreadyExists {
                kind: ObjectKind::Database,
                name: location,
            }),
        }
    }

    /// Creates an empty table, creating the database directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlreadyExists`] if the table is present and
    /// [`CoreError::InvalidName`] for unusable names.
    pub fn create_table(&self, table: &str) -> CoreResult<String> {
        let table = normalize_table_name(table)?;
        let _guard = self.lock.lock();

        match self.store().create(&table)? {
            DirStatus::Created => {
                info!(database = %self.backend.location(), "database not found, created it");
            }
            DirStatus::AlreadyExisted => {
                debug!(database = %self.backend.location(), "database found");
            }
        }
        info!(table = %table, "table created");
        Ok(format!("table {table} created successfully"))
    }

    /// Appends a record to the end of a table.
    ///
    /// The record is validated against its not-null constraints before
    /// anything is read or written. A table that cannot be loaded is
    /// treated as empty (first insert) and is written from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field,
    /// [`CoreError::Schema`] if the record is not structured, or
    /// [`CoreError::Save`] if the write fails.
    pub fn add_data<T: Structured>(&self, table: &str, record: &T) -> CoreResult<()> {
        let table = normalize_table_name(table)?;
        let fields = Fields::inspect_record(record)?;
        fields.validate()?;

        let _guard = self.lock.lock();
        let store = self.store();

        let mut file = store.load(&table).unwrap_or_else(|e| {
            warn!(table = %table, error = %e, "table not loaded, inserting first record");
            RecordFile::new()
        });
        file.data.push(fields.into_record());
        store.save(&table, &file)?;

        info!(table = %table, records = file.len(), "record added");
        Ok(())
    }

    /// Merges a patch into the record at `index`.
    ///
    /// The patch type must declare exactly the stored record's fields; set
    /// fields overwrite, unset (`None`) fields are kept. Fields are taken
    /// from the serialized patch, so `None`s must serialize as `null` rather
    /// than be skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TableNotFound`], [`CoreError::IndexOutOfBounds`],
    /// [`CoreError::SchemaMismatch`], or [`CoreError::Save`].
    pub fn update_data<T: Serialize + ?Sized>(
        &self,
        table: &str,
        index: isize,
        patch: &T,
    ) -> CoreResult<()> {
        let table = normalize_table_name(table)?;
        let patch = Fields::inspect(patch)?;

        let _guard = self.lock.lock();
        let store = self.store();

        let mut file = store.load(&table)?;
        let position = checked_position(&table, index, file.len())?;
        merge(&mut file.data[position], &patch)?;
        store.save(&table, &file)?;

        info!(table = %table, index = position, "record updated");
        Ok(())
    }

    /// Removes the record at `index`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TableNotFound`], [`CoreError::IndexOutOfBounds`],
    /// or [`CoreError::Save`].
    pub fn delete_data(&self, table: &str, index: isize) -> CoreResult<()> {
        let table = normalize_table_name(table)?;

        let _guard = self.lock.lock();
        let store = self.store();

        let mut file = store.load(&table)?;
        let position = checked_position(&table, index, file.len())?;
        file.data.remove(position);
        store.save(&table, &file)?;

        info!(table = %table, index = position, "record deleted");
        Ok(())
    }

    /// Returns every record matching `filter`.
    ///
    /// A filter with no set fields returns the whole table, even when it
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Load`] if the table cannot be loaded and
    /// [`CoreError::NoMatch`] if a non-empty filter selects nothing.
    pub fn find_many<F: Serialize + ?Sized>(
        &self,
        table: &str,
        filter: &F,
    ) -> CoreResult<Vec<Record>> {
        let table = normalize_table_name(table)?;
        let filter = Filter::new(filter)?;

        let _guard = self.lock.lock();
        let file = self
            .store()
            .load(&table)
            .map_err(|e| CoreError::load(&table, e))?;

        if filter.is_empty() {
            debug!(table = %table, records = file.len(), "unfiltered scan");
            return Ok(file.data);
        }

        let matched: Vec<Record> = file
            .data
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        if matched.is_empty() {
            return Err(CoreError::NoMatch { table });
        }

        debug!(table = %table, matched = matched.len(), "filtered scan");
        Ok(matched)
    }

    /// Returns the first record matching `filter`, in stored order.
    ///
    /// A filter with no set fields returns the first record of the table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Load`] if the table cannot be loaded,
    /// [`CoreError::TableEmpty`] for an unfiltered lookup on an empty
    /// table, and [`CoreError::NoMatch`] if a non-empty filter selects
    /// nothing.
    pub fn find_one<F: Serialize + ?Sized>(&self, table: &str, filter: &F) -> CoreResult<Record> {
        let table = normalize_table_name(table)?;
        let filter = Filter::new(filter)?;

        let _guard = self.lock.lock();
        let file = self
            .store()
            .load(&table)
            .map_err(|e| CoreError::load(&table, e))?;

        if filter.is_empty() {
            return file
                .data
                .into_iter()
                .next()
                .ok_or(CoreError::TableEmpty { table });
        }

        file.data
            .into_iter()
            .find(|record| filter.matches(record))
            .ok_or(CoreError::NoMatch { table })
    }

    /// Like [`Database::find_many`], decoding each record into `T`.
    ///
    /// # Errors
    ///
    /// As `find_many`, plus [`CoreError::Codec`] if a record does not fit `T`.
    pub fn find_many_as<T, F>(&self, table: &str, filter: &F) -> CoreResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        self.find_many(table, filter)?
            .into_iter()
            .map(|record| goson_codec::from_record(record).map_err(CoreError::from))
            .collect()
    }

    /// Like [`Database::find_one`], decoding the record into `T`.
    ///
    /// # Errors
    ///
    /// As `find_one`, plus [`CoreError::Codec`] if the record does not fit `T`.
    pub fn find_one_as<T, F>(&self, table: &str, filter: &F) -> CoreResult<T>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        Ok(goson_codec::from_record(self.find_one(table, filter)?)?)
    }
}

/// Converts a caller index into a position inside `[0, len)`.
fn checked_position(table: &str, index: isize, len: usize) -> CoreResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&position| position < len)
        .ok_or_else(|| CoreError::IndexOutOfBounds {
            table: table.to_string(),
            index,
            len,
        })
}
