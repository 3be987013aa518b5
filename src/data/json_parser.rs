//! JSON data parsing
//!
//! Parses JSON arrays of flat objects into a [`Dataset`]. An object with
//! an `error` string is a server-signalled failure, not data.

use crate::constants::{JSON_ERROR_KEY, JSON_WRAPPER_KEYS};
use crate::data::error::{LoadError, LoadResult};
use crate::types::{DataOrigin, Dataset};
use serde_json::Value;
use tracing::warn;

/// Parse JSON content from a string
///
/// The header is the key order of the first object. Elements that are not
/// objects are skipped.
pub fn parse_json_content(json: &str, origin: DataOrigin) -> LoadResult<Dataset> {
    let value: Value = serde_json::from_str(json)?;

    let array = extract_array(&value)?;

    let mut skipped = 0usize;
    let records: Vec<Vec<(String, String)>> = array
        .iter()
        .filter_map(|item| {
            let Some(obj) = item.as_object() else {
                skipped += 1;
                return None;
            };
            Some(
                obj.iter()
                    .map(|(key, value)| (key.clone(), json_value_to_text(value)))
                    .collect(),
            )
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "skipped non-object array elements");
    }

    Ok(Dataset::from_records(records, origin))
}

/// Extract the row array, handling the error signal and wrapper objects
fn extract_array(value: &Value) -> LoadResult<&Vec<Value>> {
    match value {
        Value::Array(arr) => Ok(arr),
        Value::Object(obj) => {
            if let Some(Value::String(message)) = obj.get(JSON_ERROR_KEY) {
                return Err(LoadError::Payload(message.clone()));
            }
            for key in JSON_WRAPPER_KEYS {
                if let Some(Value::Array(arr)) = obj.get(*key) {
                    return Ok(arr);
                }
            }
            Err(LoadError::Parse(
                "JSON must be an array or have a data/rows/items/records/results array".to_string(),
            ))
        }
        _ => Err(LoadError::Parse(
            "JSON must be an array of objects".to_string(),
        )),
    }
}

/// Render a JSON value as cell text
fn json_value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr
            .iter()
            .map(json_value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
