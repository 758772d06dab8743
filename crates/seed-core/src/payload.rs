//! Locating the record array inside a decoded input document.
//!
//! Input files either hold the records as a top-level array or wrap them in
//! an object under a model-specific key (for example `{"stations": [...]}`).

use crate::validator::RawRecord;
use serde_json::Value;

/// The decoded document does not contain a record array where expected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PayloadError {
    #[error("Expected a JSON array of records{}, found {found}", expected_key_hint(.payload_key))]
    UnexpectedShape {
        payload_key: Option<String>,
        found: String,
    },
}

fn expected_key_hint(payload_key: &Option<String>) -> String {
    match payload_key {
        Some(key) => format!(" or an object with a \"{key}\" array"),
        None => String::new(),
    }
}

/// Extract the records from `document`.
pub fn extract_records(
    document: Value,
    payload_key: Option<&str>,
) -> Result<Vec<RawRecord>, PayloadError> {
    match (document, payload_key) {
        (Value::Array(records), _) => Ok(records),
        (Value::Object(mut obj), Some(key)) => match obj.remove(key) {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(unexpected(
                payload_key,
                format!("\"{key}\" holding {}", describe(&other)),
            )),
            None => Err(unexpected(
                payload_key,
                format!("an object without a \"{key}\" key"),
            )),
        },
        (other, _) => Err(unexpected(payload_key, describe(&other).to_string())),
    }
}

fn unexpected(payload_key: Option<&str>, found: String) -> PayloadError {
    PayloadError::UnexpectedShape {
        payload_key: payload_key.map(str::to_string),
        found,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
