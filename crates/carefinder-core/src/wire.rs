// crates/carefinder-core/src/wire.rs

//! Body decoding for the facilities endpoint.
//!
//! Kept apart from the HTTP client so front ends that do their own fetch
//! (wasm) decode bodies exactly the same way.

use crate::model::FacilityRecord;
use serde_json::Value;
use tracing::{debug, warn};

/// Decode a 2xx body into facility records.
///
/// Anything that is not a JSON array (an object, `null`, invalid JSON)
/// degrades to an empty list. Array elements that do not look like a
/// facility are skipped.
pub fn parse_facilities(body: &[u8]) -> Vec<FacilityRecord> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "facilities body is not valid JSON, treating as empty");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        other => {
            debug!(kind = json_kind(&other), "facilities body is not a list, treating as empty");
            return Vec::new();
        }
    };

    let total = items.len();
    let records: Vec<FacilityRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if records.len() < total {
        warn!(skipped = total - records.len(), total, "skipped malformed facility entries");
    }
    records
}

/// Backend-supplied `detail` message from an error body, if any.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
