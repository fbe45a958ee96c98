//! Cross-cutting error types for Marketlens.
//!
//! Derivation stages never fail: degradations are absorbed locally (see
//! [`crate::diagnostics`]). The errors here only arise at boundaries where raw
//! JSON becomes a [`crate::RecordSet`]. Transport and configuration errors are
//! defined in their respective crates and converge on `anyhow` in `lens-cli`.

use thiserror::Error;

/// Errors raised while turning raw payloads into records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not an array of records.
    #[error("expected a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },

    /// An array element is not a JSON object.
    #[error("record at index {index} is not an object (found {found})")]
    NotAnObject { index: usize, found: &'static str },
}

/// Name of a JSON value's kind, used in error messages.
#[must_use]
pub const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
