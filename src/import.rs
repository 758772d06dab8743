//! Import pipeline: read, validate, partition, bulk insert.

use crate::error::SeedError;
use seed_core::{
    extract_records, partition, IndexDefinition, PartitionError, RawRecord, RejectedRecord,
    Schema, ValidatedRecord,
};
use seed_file::LocalFileReader;
use seed_sink::{DocumentSink, SinkError};
use std::path::Path;
use tracing::{debug, info, warn};

/// Why an import that got past the pre-flight checks still failed.
#[derive(Debug)]
pub enum ImportFailure {
    /// Every record was rejected; the store was never touched.
    NoValidRecords,
    /// The bulk insert itself failed.
    Store(SinkError),
}

/// Counts and problems of one import run.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Records found in the input
    pub total: usize,
    /// Records that passed validation
    pub accepted: usize,
    /// Records that failed validation, in input order
    pub rejected: Vec<RejectedRecord>,
    /// Documents the store reported as written, including those written
    /// before a store failure
    pub inserted: u64,
    /// Validation only, nothing sent to the store
    pub dry_run: bool,
    pub failure: Option<ImportFailure>,
}

impl ImportOutcome {
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

/// A validated batch that has not been written yet.
#[derive(Debug)]
pub struct PreparedImport {
    pub total: usize,
    pub accepted: Vec<ValidatedRecord>,
    pub rejected: Vec<RejectedRecord>,
    /// Indexes to ensure before writing
    pub indexes: Vec<IndexDefinition>,
}

impl PreparedImport {
    /// Validate and partition already decoded records.
    ///
    /// An all-invalid batch is not an error here: it comes back with an
    /// empty `accepted` list so the rejections can still be reported.
    pub fn from_records(records: Vec<RawRecord>, schema: &Schema) -> Result<Self, PartitionError> {
        let total = records.len();
        match partition(records, schema) {
            Ok(batch) => Ok(Self {
                total,
                accepted: batch.accepted,
                rejected: batch.rejected,
                indexes: schema.indexes.clone(),
            }),
            Err(PartitionError::NoValidRecords { rejected }) => Ok(Self {
                total,
                accepted: Vec::new(),
                rejected,
                indexes: schema.indexes.clone(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Write the accepted records with a single bulk insert.
    ///
    /// The sink is not called at all when nothing was accepted.
    pub async fn load<S: DocumentSink + ?Sized>(self, sink: &S) -> ImportOutcome {
        let mut outcome = self.outcome(false);
        if self.accepted.is_empty() {
            outcome.failure = Some(ImportFailure::NoValidRecords);
            return outcome;
        }

        if !self.indexes.is_empty() {
            if let Err(e) = sink.ensure_indexes(&self.indexes).await {
                debug!("Creating indexes on '{}' failed: {}", sink.collection_name(), e);
                outcome.failure = Some(ImportFailure::Store(e));
                return outcome;
            }
        }

        info!(
            "Inserting {} document(s) into '{}'",
            self.accepted.len(),
            sink.collection_name()
        );

        match sink.insert_all(&self.accepted).await {
            Ok(inserted) => {
                info!("Inserted {} document(s)", inserted);
                outcome.inserted = inserted;
            }
            Err(e) => {
                // The reporter surfaces the failure itself
                debug!(
                    "Bulk insert into '{}' failed after {} document(s): {}",
                    sink.collection_name(),
                    e.inserted(),
                    e
                );
                outcome.inserted = e.inserted();
                outcome.failure = Some(ImportFailure::Store(e));
            }
        }
        outcome
    }

    /// Report what would be written without touching a store.
    pub fn dry_run(self) -> ImportOutcome {
        let mut outcome = self.outcome(true);
        if self.accepted.is_empty() {
            outcome.failure = Some(ImportFailure::NoValidRecords);
        }
        outcome
    }

    fn outcome(&self, dry_run: bool) -> ImportOutcome {
        ImportOutcome {
            total: self.total,
            accepted: self.accepted.len(),
            rejected: self.rejected.clone(),
            inserted: 0,
            dry_run,
            failure: None,
        }
    }
}

/// Read `file`, locate its records and validate them against `schema`.
///
/// Everything here happens before the store is touched.
pub async fn prepare_import(schema: &Schema, file: &Path) -> Result<PreparedImport, SeedError> {
    info!("Reading {} records from {}", schema.name, file.display());

    let document = LocalFileReader::read_json(file).await?;
    let records = extract_records(document, schema.payload_key.as_deref()).map_err(|source| {
        SeedError::Payload {
            path: file.to_path_buf(),
            source,
        }
    })?;

    let prepared = match PreparedImport::from_records(records, schema) {
        Ok(prepared) => prepared,
        // NoValidRecords is folded into an empty accepted list
        Err(_) => return Err(SeedError::EmptyInput(file.to_path_buf())),
    };

    for rejected in &prepared.rejected {
        warn!(
            "Record #{} rejected: {}",
            rejected.position(),
            rejected.violations.join("; ")
        );
    }

    info!(
        "Validated {} record(s): {} accepted, {} rejected",
        prepared.total,
        prepared.accepted.len(),
        prepared.rejected.len()
    );

    Ok(prepared)
}

/// Import `file` into `sink` as records of `schema`.
pub async fn run_import<S: DocumentSink + ?Sized>(
    sink: &S,
    schema: &Schema,
    file: &Path,
) -> Result<ImportOutcome, SeedError> {
    let prepared = prepare_import(schema, file).await?;
    Ok(prepared.load(sink).await)
}
