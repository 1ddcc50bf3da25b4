//! # GoSon Codec
//!
//! JSON encoding/decoding for GoSon table files.
//!
//! A table file is a [`RecordFile`]: one object whose `data` member holds
//! the ordered list of [`Record`]s. This crate is the only place that knows
//! the byte format; the engine treats it as an opaque codec.
//!
//! ## Guarantees
//!
//! - `decode(encode(x)) == x` for every record list, floats included
//! - Key order inside each record is preserved
//! - Pretty output uses two-space indentation (cosmetic, not contractual)
//!
//! ## Usage
//!
//! ```
//! use goson_codec::{decode, encode, Record, RecordFile, Value};
//!
//! let mut record = Record::new();
//! record.insert("name".into(), Value::from("Ada"));
//! let file = RecordFile::from(vec![record]);
//!
//! let bytes = encode(&file, true).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), file);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod record;

pub use error::{CodecError, CodecResult};
pub use record::{Record, RecordFile};
pub use serde_json::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for types that can be encoded to table-file bytes.
pub trait Encode {
    /// Encode this value, pretty-printed when `pretty` is set.
    fn encode(&self, pretty: bool) -> CodecResult<Vec<u8>>;
}

/// Trait for types that can be decoded from table-file bytes.
pub trait Decode: Sized {
    /// Decode this value from bytes.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}

impl Encode for RecordFile {
    fn encode(&self, pretty: bool) -> CodecResult<Vec<u8>> {
        let result = if pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        };
        result.map_err(|e| CodecError::encoding_failed(e.to_string()))
    }
}

impl Decode for RecordFile {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::decoding_failed(e.to_string()))
    }
}

/// Encodes a record file.
pub fn encode(file: &RecordFile, pretty: bool) -> CodecResult<Vec<u8>> {
    file.encode(pretty)
}

/// Decodes a record file.
pub fn decode(bytes: &[u8]) -> CodecResult<RecordFile> {
    RecordFile::decode(bytes)
}

/// Converts a typed caller value into its generic JSON form.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> CodecResult<Value> {
    serde_json::to_value(value).map_err(|e| CodecError::encoding_failed(e.to_string()))
}

/// Rebuilds a typed value from a generic record.
pub fn from_record<T: DeserializeOwned>(record: Record) -> CodecResult<T> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| CodecError::decoding_failed(e.to_string()))
}
