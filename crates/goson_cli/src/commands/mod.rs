//! CLI command implementations.

pub mod create;
pub mod modify;
pub mod query;

use goson_core::Value;

/// Result type shared by the commands.
pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Parses a command-line argument that must hold a JSON object.
pub fn parse_object(text: &str, what: &str) -> CommandResult<Value> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| format!("{what} is not valid JSON: {e}"))?;
    if !value.is_object() {
        return Err(format!("{what} must be a JSON object").into());
    }
    Ok(value)
}
