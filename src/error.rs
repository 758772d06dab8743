//! Errors that stop a run before any record reaches the store.

use seed_core::{PayloadError, SchemaError};
use seed_file::FileError;
use std::path::PathBuf;
use thiserror::Error;

/// Pre-flight failures.
///
/// Per-record validation problems are not errors (they are collected in the
/// import outcome), and store failures are reported through
/// [`crate::ImportFailure`].
#[derive(Error, Debug)]
pub enum SeedError {
    /// Unknown model name or a broken built-in schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Input file missing, unreadable or not JSON.
    #[error(transparent)]
    File(#[from] FileError),

    /// Input JSON is not a record array in a recognized wrapper.
    #[error("{}: {source}", .path.display())]
    Payload {
        path: PathBuf,
        #[source]
        source: PayloadError,
    },

    /// Input holds zero records.
    #[error("No records found in {}", .0.display())]
    EmptyInput(PathBuf),
}
