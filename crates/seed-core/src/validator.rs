//! Record validation against a [`Schema`].
//!
//! Validation is exhaustive: every violation in a record is collected so a
//! single pass reports everything wrong with it. Malformed input is a normal
//! [`ValidationResult::Rejected`] outcome, never an error. Records are never
//! modified: undeclared fields are kept, declared defaults are not applied,
//! and no type coercion happens.

use crate::schema::{FieldDefinition, FieldKind, Schema};
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// A record as read from the input file.
pub type RawRecord = Value;

/// A record known to satisfy its schema.
///
/// Can only be produced by [`validate`]; the contents are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedRecord(Map<String, Value>);

impl ValidatedRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<ValidatedRecord> for Value {
    fn from(record: ValidatedRecord) -> Self {
        Value::Object(record.0)
    }
}

/// Outcome of validating one record.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Accepted(ValidatedRecord),
    Rejected {
        raw: RawRecord,
        violations: Vec<String>,
    },
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }
}

/// Validate one record, taking ownership so the accepted value is the input
/// itself.
pub fn validate(record: RawRecord, schema: &Schema) -> ValidationResult {
    let violations = violations(&record, schema);
    match record {
        Value::Object(map) if violations.is_empty() => {
            ValidationResult::Accepted(ValidatedRecord(map))
        }
        raw => ValidationResult::Rejected { raw, violations },
    }
}

/// Collect every violation of `schema` in `record`, in schema field order.
pub fn violations(record: &Value, schema: &Schema) -> Vec<String> {
    let mut found = Vec::new();
    match record {
        Value::Object(obj) => check_object(obj, &schema.fields, "", &mut found),
        other => found.push(format!(
            "record expected object, got {}",
            json_type_name(other)
        )),
    }
    found
}

fn check_object(
    obj: &Map<String, Value>,
    fields: &[FieldDefinition],
    path_prefix: &str,
    found: &mut Vec<String>,
) {
    for field in fields {
        let field_path = make_path(path_prefix, &field.name);
        match obj.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    found.push(format!("{field_path} is required"));
                }
            }
            Some(value) => check_value(value, &field.kind, &field_path, found),
        }
    }

    // Undeclared fields are stored as-is, so they must still be storable
    for (name, value) in obj {
        if !fields.iter().any(|f| &f.name == name) {
            check_storable(value, &make_path(path_prefix, name), found);
        }
    }
}

fn check_storable(value: &Value, field_path: &str, found: &mut Vec<String>) {
    match value {
        Value::Number(n) if !fits_bson(n) => {
            found.push(format!("{field_path} holds integer out of range"));
        }
        Value::Array(elements) => {
            for (i, element) in elements.iter().enumerate() {
                check_storable(element, &format!("{field_path}[{i}]"), found);
            }
        }
        Value::Object(obj) => {
            for (name, nested) in obj {
                check_storable(nested, &make_path(field_path, name), found);
            }
        }
        _ => {}
    }
}

/// BSON has no unsigned 64-bit integer: values above `i64::MAX` cannot be stored.
fn fits_bson(n: &Number) -> bool {
    n.is_i64() || n.is_f64()
}

fn check_value(value: &Value, kind: &FieldKind, field_path: &str, found: &mut Vec<String>) {
    match (kind, value) {
        (FieldKind::Number, Value::Number(n)) if !fits_bson(n) => {
            found.push(format!("{field_path} expected number, got integer out of range"));
        }
        (FieldKind::String, Value::String(_))
        | (FieldKind::Number, Value::Number(_))
        | (FieldKind::Boolean, Value::Bool(_)) => {}
        (FieldKind::Array { items }, Value::Array(elements)) => {
            for (i, element) in elements.iter().enumerate() {
                check_value(element, items, &format!("{field_path}[{i}]"), found);
            }
        }
        (FieldKind::Object { fields }, Value::Object(obj)) => {
            check_object(obj, fields, field_path, found);
        }
        (kind, value) => found.push(format!(
            "{field_path} expected {kind}, got {}",
            json_type_name(value)
        )),
    }
}

/// Returns the JSON type name for violation messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}
