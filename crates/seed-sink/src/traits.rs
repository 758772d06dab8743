//! DocumentSink trait definition.

use crate::error::SinkError;
use seed_core::{IndexDefinition, ValidatedRecord};

/// A target collection that validated records are loaded into.
///
/// The CLI drives a [`crate::MongoSink`]; tests drive an in-memory
/// implementation through the same pipeline code.
#[async_trait::async_trait]
pub trait DocumentSink: Send + Sync {
    /// Name of the target collection, for logs and messages.
    fn collection_name(&self) -> &str;

    /// Create `indexes` on the collection. Existing identical indexes are kept.
    async fn ensure_indexes(&self, indexes: &[IndexDefinition]) -> Result<(), SinkError>;

    /// Insert every record with a single bulk-insert call.
    ///
    /// Returns the number of documents the store reports as inserted. The
    /// store's native batch semantics apply; there is no rollback of
    /// documents written before a failure, and such a failure is returned
    /// as [`SinkError::PartialWrite`] carrying their count.
    async fn insert_all(&self, records: &[ValidatedRecord]) -> Result<u64, SinkError>;

    /// Delete every document in the collection and return how many were
    /// removed. An already empty collection yields `Ok(0)`.
    async fn delete_all(&self) -> Result<u64, SinkError>;
}
