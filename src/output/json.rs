//! JSON output formatting
//!
//! JSON is the default output format.

use serde::Serialize;

use super::types::error_codes::SERIALIZATION_ERROR;

/// Format a result as JSON
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| {
        format!(
            r#"{{"error": true, "code": "{}", "message": "{}"}}"#,
            SERIALIZATION_ERROR, e
        )
    })
}

/// Format a result as compact JSON (single line)
pub fn format_json_compact<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        format!(
            r#"{{"error":true,"code":"{}","message":"{}"}}"#,
            SERIALIZATION_ERROR, e
        )
    })
}
