//! # GoSon Core
//!
//! Record-store engine for GoSon embedded JSON databases.
//!
//! A database is a directory; each table is one JSON file holding an
//! ordered list of schema-less records. This crate provides:
//! - Schema inspection of caller types (field names, not-null constraints)
//! - The table store: create, load and save whole table files
//! - Partial-update merging of patches into stored records
//! - Equality filters for record selection
//! - The [`Database`] facade, serializing every operation on one lock
//!
//! Records go in as any `Serialize` struct and come back as generic
//! [`Record`]s (or, through the `*_as` helpers, as any `Deserialize` type).
//! Patches and filters use `Option<T>` fields: `None` means "not specified".

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod filter;
mod merge;
mod schema;
mod table;

pub use config::Config;
pub use database::Database;
pub use error::{CoreError, CoreResult, ObjectKind};
pub use filter::Filter;
pub use merge::merge;
pub use schema::{is_zero_value, FieldConstraint, Fields, Structured};
pub use table::{normalize_table_name, TableStore};

pub use goson_codec::{Record, RecordFile, Value};
pub use goson_storage::{DirStatus, FileBackend, InMemoryBackend, StorageBackend};

/// Crate version, for front-ends that report it.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
