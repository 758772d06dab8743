//! Clearing a collection.

use seed_sink::{DocumentSink, SinkError};
use tracing::info;

/// Delete every document in the sink's collection. No filter, no validation.
pub async fn run_delete<S: DocumentSink + ?Sized>(sink: &S) -> Result<u64, SinkError> {
    info!("Deleting all documents from '{}'", sink.collection_name());
    let deleted = sink.delete_all().await?;
    info!("Deleted {} document(s) from '{}'", deleted, sink.collection_name());
    Ok(deleted)
}
