//! # GoSon Storage
//!
//! Storage backends for GoSon databases.
//!
//! A backend is bound to one database directory and stores **whole files of
//! opaque bytes** by name. It never interprets what it stores: encoding a
//! table's records is the codec's job, deciding what to write is the engine's.
//!
//! ## Design Principles
//!
//! - Backends read and write complete files, never ranges
//! - Directory creation reports whether the directory was new
//! - Must be `Send + Sync` so a database handle can move across threads
//! - Concurrency control lives above the backend, in the database handle
//!
//! ## Available Backends
//!
//! - [`FileBackend`] - `<root>/<name>.json` files on the OS file system
//! - [`InMemoryBackend`] - For testing and ephemeral databases
//!
//! ## Example
//!
//! ```rust
//! use goson_storage::{DirStatus, InMemoryBackend, StorageBackend};
//!
//! let backend = InMemoryBackend::new();
//! assert_eq!(backend.create_root().unwrap(), DirStatus::Created);
//! backend.write("users", b"{\"data\":[]}").unwrap();
//! assert_eq!(backend.read("users").unwrap(), b"{\"data\":[]}");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::{DirStatus, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use file::{FileBackend, TABLE_EXTENSION};
pub use memory::InMemoryBackend;
