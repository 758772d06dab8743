//! Splitting a batch of raw records into accepted and rejected sets.

use crate::schema::Schema;
use crate::validator::{validate, RawRecord, ValidatedRecord, ValidationResult};
use tracing::debug;

/// A record that failed validation, with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Zero-based position in the input array
    pub index: usize,
    pub raw: RawRecord,
    pub violations: Vec<String>,
}

impl RejectedRecord {
    /// One-based position in the input, as shown to users.
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// Stable split of an input batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub accepted: Vec<ValidatedRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// Errors that end a run at partition time.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PartitionError {
    /// The input file decoded to zero records
    #[error("No records found in input")]
    EmptyInput,

    /// Every record was rejected
    #[error("No valid data to import ({} invalid item(s))", .rejected.len())]
    NoValidRecords { rejected: Vec<RejectedRecord> },
}

/// Validate every record and split the results, preserving input order in
/// both outputs.
pub fn partition(records: Vec<RawRecord>, schema: &Schema) -> Result<Partition, PartitionError> {
    if records.is_empty() {
        return Err(PartitionError::EmptyInput);
    }

    let mut result = Partition::default();
    for (index, record) in records.into_iter().enumerate() {
        match validate(record, schema) {
            ValidationResult::Accepted(validated) => result.accepted.push(validated),
            ValidationResult::Rejected { raw, violations } => {
                debug!(
                    "Record #{} rejected with {} violation(s)",
                    index + 1,
                    violations.len()
                );
                result.rejected.push(RejectedRecord {
                    index,
                    raw,
                    violations,
                });
            }
        }
    }

    if result.accepted.is_empty() {
        return Err(PartitionError::NoValidRecords {
            rejected: result.rejected,
        });
    }

    debug!(
        "Partitioned {} records for {}: {} accepted, {} rejected",
        result.total(),
        schema.name,
        result.accepted.len(),
        result.rejected.len()
    );

    Ok(result)
}
