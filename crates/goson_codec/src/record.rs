//! Record and record-file types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One schema-less entry in a table.
///
/// Keys keep their insertion order, so a record written from a typed value
/// reloads with its fields in declaration order.
pub type Record = Map<String, Value>;

/// The full content of one table file.
///
/// On disk this is an object with a single `data` member holding the
/// ordered record list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFile {
    /// Records in stored order.
    pub data: Vec<Record>,
}

impl RecordFile {
    /// Creates an empty record file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<Record>> for RecordFile {
    fn from(data: Vec<Record>) -> Self {
        Self { data }
    }
}
