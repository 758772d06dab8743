//! Core import logic for mongo-seed.
//!
//! This crate holds everything that decides *what* gets written, with no I/O:
//!
//! - [`Schema`] - Declared record shapes, loaded from YAML
//! - [`Model`] / [`registry::lookup`] - The closed set of built-in models
//! - [`validate`] - Exhaustive per-record validation
//! - [`partition`] - Stable split of a batch into accepted and rejected records
//! - [`extract_records`] - Locating the record array in a decoded file
//!
//! # Example
//!
//! ```rust
//! use seed_core::{partition, registry};
//! use serde_json::json;
//!
//! let schema = registry::lookup("AuctionItem").unwrap();
//! let records = vec![
//!     json!({"title": "Lamp", "description": "Brass", "start_price": 10, "reserve_price": 25}),
//!     json!({"title": "Chair"}),
//! ];
//!
//! let batch = partition(records, &schema).unwrap();
//! assert_eq!(batch.accepted.len(), 1);
//! assert_eq!(batch.rejected[0].violations[0], "description is required");
//! ```

pub mod partition;
pub mod payload;
pub mod registry;
pub mod schema;
pub mod validator;

// Re-exports for convenience
pub use partition::{partition, Partition, PartitionError, RejectedRecord};
pub use payload::{extract_records, PayloadError};
pub use registry::Model;
pub use schema::{FieldDefinition, FieldKind, IndexDefinition, IndexKind, Schema, SchemaError};
pub use validator::{validate, violations, RawRecord, ValidatedRecord, ValidationResult};
