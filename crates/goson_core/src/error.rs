//! Error types for GoSon core.

use std::fmt;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// What kind of object a creation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A database directory.
    Database,
    /// A table file.
    Table,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => f.write_str("database"),
            Self::Table => f.write_str("table"),
        }
    }
}

/// Errors that can occur in GoSon core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] goson_storage::StorageError),

    /// JSON codec error.
    #[error("codec error: {0}")]
    Codec(#[from] goson_codec::CodecError),

    /// The database or table is already present.
    #[error("{kind} {name} already exists")]
    AlreadyExists {
        /// Database or table.
        kind: ObjectKind,
        /// Name as resolved on disk.
        name: String,
    },

    /// The table file is missing or unreadable.
    #[error("table {table} not found")]
    TableNotFound {
        /// Normalized table name.
        table: String,
    },

    /// The first record of an empty table was requested.
    #[error("table {table} has no records")]
    TableEmpty {
        /// Normalized table name.
        table: String,
    },

    /// A required field holds its default value.
    #[error("{message}")]
    Validation {
        /// The offending field.
        field: String,
        /// Message naming the field.
        message: String,
    },

    /// The patch does not declare exactly the record's fields.
    #[error("update data does not match table fields: expected {expected:?}, got {actual:?}")]
    SchemaMismatch {
        /// Keys of the stored record.
        expected: Vec<String>,
        /// Fields declared by the patch.
        actual: Vec<String>,
    },

    /// A record position outside the table.
    #[error("index {index} out of bounds in table {table} (len {len})")]
    IndexOutOfBounds {
        /// Normalized table name.
        table: String,
        /// The requested position.
        index: isize,
        /// Number of stored records.
        len: usize,
    },

    /// A filtered query selected nothing.
    #[error("no data found in table {table} matching the filter criteria")]
    NoMatch {
        /// Normalized table name.
        table: String,
    },

    /// The table could not be loaded for a query.
    #[error("failed to load table {table}: {source}")]
    Load {
        /// Normalized table name.
        table: String,
        /// Underlying failure.
        #[source]
        source: Box<CoreError>,
    },

    /// The table could not be written back.
    #[error("failed to save table {table}: {source}")]
    Save {
        /// Normalized table name.
        table: String,
        /// Underlying failure.
        #[source]
        source: Box<CoreError>,
    },

    /// A value that is not a structured record was supplied.
    #[error("schema error: {message}")]
    Schema {
        /// Description of the problem.
        message: String,
    },

    /// A table name that cannot be mapped to a file.
    #[error("invalid table name: {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

impl CoreError {
    /// Creates a validation error for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Wraps a failure as a load error for `table`.
    pub fn load(table: impl Into<String>, source: CoreError) -> Self {
        Self::Load {
            table: table.into(),
            source: Box::new(source),
        }
    }

    /// Wraps a failure as a save error for `table`.
    pub fn save(table: impl Into<String>, source: CoreError) -> Self {
        Self::Save {
            table: table.into(),
            source: Box::new(source),
        }
    }

    /// Returns true for the "not found" family: missing table or empty table.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::TableNotFound { .. } | Self::TableEmpty { .. } => true,
            Self::Load { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_verbatim() {
        let err = CoreError::validation("email", r#"please provide "email""#);
        assert_eq!(err.to_string(), r#"please provide "email""#);
    }

    #[test]
    fn already_exists_names_kind() {
        let err = CoreError::AlreadyExists {
            kind: ObjectKind::Table,
            name: "users".into(),
        };
        assert_eq!(err.to_string(), "table users already exists");
    }

    #[test]
    fn not_found_family() {
        let missing = CoreError::TableNotFound {
            table: "users".into(),
        };
        assert!(CoreError::load("users", missing).is_not_found());
        assert!(!CoreError::NoMatch {
            table: "users".into()
        }
        .is_not_found());
    }
}
