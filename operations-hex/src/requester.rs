//! Parsing of requester-supplied compensation payloads.

use serde_json::{Map, Value};

/// Extracts the optional `comment` of a refund or recall payload.
///
/// The payload must be a JSON object. A string comment is returned as-is,
/// other scalars by their JSON text, and a missing or `null` comment as
/// `None`.
pub fn requester_comment(body: &str) -> Result<Option<String>, serde_json::Error> {
    let payload: Map<String, Value> = serde_json::from_str(body)?;
    Ok(match payload.get("comment") {
        None | Some(Value::Null) => None,
        Some(Value::String(comment)) => Some(comment.clone()),
        Some(other) => Some(other.to_string()),
    })
}
