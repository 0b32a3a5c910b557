//! JSON serialization of tables, estimates, and significance results.

use serde::Serialize;

/// Serialize a result to a compact JSON string.
///
/// # Errors
///
/// Returns an error if a category value fails to serialize.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize a result to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if a category value fails to serialize.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
