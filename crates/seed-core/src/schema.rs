//! Schema definitions for seed models.
//!
//! A [`Schema`] is the declared shape a record must satisfy before it is
//! written to the store. Schemas are written in YAML:
//!
//! ```yaml
//! name: Product
//! payload_key: products
//! fields:
//!   - name: name
//!     type: string
//!     required: true
//!   - name: tags
//!     type: array
//!     items:
//!       type: string
//!   - name: dimensions
//!     type: object
//!     fields:
//!       - name: width
//!         type: number
//!         required: true
//! indexes:
//!   - fields: [name]
//!     unique: true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The model name has no registered schema
    #[error("Unknown model \"{name}\" (known models: {known})")]
    UnknownModel { name: String, known: String },

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The same field name appears twice in one object shape
    #[error("Field '{field}' is declared more than once in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// An index names a field the schema does not declare
    #[error("Index in schema '{schema}' refers to undeclared field '{field}'")]
    UnknownIndexField { schema: String, field: String },
}

// ============================================================================
// Field Types
// ============================================================================

/// Expected kind of a field value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    /// Array whose elements all satisfy `items`
    Array { items: Box<FieldKind> },
    /// Nested object with its own field definitions; none means any object
    Object {
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
}

impl FieldKind {
    pub fn array(items: FieldKind) -> Self {
        FieldKind::Array {
            items: Box::new(items),
        }
    }

    pub fn object(fields: Vec<FieldDefinition>) -> Self {
        FieldKind::Object { fields }
    }

    /// Name used in violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array { .. } => "array",
            FieldKind::Object { .. } => "object",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Whether the field must be present and non-null
    #[serde(default)]
    pub required: bool,

    /// Expected value kind
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// Create a required field definition.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: true,
            kind,
        }
    }

    /// Create an optional field definition.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind,
        }
    }
}

// ============================================================================
// Indexes
// ============================================================================

/// How an index treats its keys.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    #[default]
    Ascending,
    /// Full-text search over string fields
    Text,
}

/// A collection index the store should hold for a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexDefinition {
    /// Indexed fields; dotted paths reach into nested objects
    pub fields: Vec<String>,
    #[serde(default)]
    pub kind: IndexKind,
    #[serde(default)]
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(fields: &[&str], kind: IndexKind) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            kind,
            unique: false,
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Declared shape of one model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    /// Model name
    pub name: String,

    /// Key holding the record array when a file wraps it in an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_key: Option<String>,

    /// Field definitions, in validation order
    pub fields: Vec<FieldDefinition>,

    /// Indexes created on the target collection before an import
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexDefinition>,
}

impl Schema {
    /// Build a schema in code, checking field uniqueness.
    pub fn new(
        name: impl Into<String>,
        payload_key: Option<String>,
        fields: Vec<FieldDefinition>,
    ) -> Result<Self, SchemaError> {
        let schema = Self {
            name: name.into(),
            payload_key,
            fields,
            indexes: Vec::new(),
        };
        schema.check_unique_fields()?;
        Ok(schema)
    }

    /// Attach indexes, checking that each one names declared fields.
    pub fn with_indexes(mut self, indexes: Vec<IndexDefinition>) -> Result<Self, SchemaError> {
        self.indexes = indexes;
        self.check_index_fields()?;
        Ok(self)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_yaml::from_str(yaml)?;
        schema.check_unique_fields()?;
        schema.check_index_fields()?;
        Ok(schema)
    }

    /// Get a top-level field definition by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the top-level required fields.
    pub fn required_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    fn check_unique_fields(&self) -> Result<(), SchemaError> {
        check_unique(&self.name, &self.fields)
    }

    fn check_index_fields(&self) -> Result<(), SchemaError> {
        for field in self.indexes.iter().flat_map(|index| &index.fields) {
            if !path_is_declared(&self.fields, field) {
                return Err(SchemaError::UnknownIndexField {
                    schema: self.name.clone(),
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }
}

fn path_is_declared(fields: &[FieldDefinition], path: &str) -> bool {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let Some(field) = fields.iter().find(|f| f.name == head) else {
        return false;
    };
    match (rest, &field.kind) {
        (None, _) => true,
        (Some(rest), FieldKind::Object { fields }) => path_is_declared(fields, rest),
        (Some(rest), FieldKind::Array { items }) => match items.as_ref() {
            FieldKind::Object { fields } => path_is_declared(fields, rest),
            _ => false,
        },
        (Some(_), _) => false,
    }
}

fn check_unique(schema: &str, fields: &[FieldDefinition]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                schema: schema.to_string(),
                field: field.name.clone(),
            });
        }
        check_kind_unique(schema, &field.kind)?;
    }
    Ok(())
}

fn check_kind_unique(schema: &str, kind: &FieldKind) -> Result<(), SchemaError> {
    match kind {
        FieldKind::Object { fields } => check_unique(schema, fields),
        FieldKind::Array { items } => check_kind_unique(schema, items),
        _ => Ok(()),
    }
}
