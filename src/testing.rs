//! In-memory document sink for exercising the pipelines without a server.
//!
//! Mirrors the parts of MongoDB's behavior the pipelines observe: an ordered
//! bulk insert stops at the first duplicate `_id` and keeps what was written
//! before it, and deleting from an empty collection removes nothing.

use async_trait::async_trait;
use seed_core::{IndexDefinition, ValidatedRecord};
use seed_sink::{DocumentSink, SinkError};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

type Document = Map<String, Value>;

pub struct MemorySink {
    collection: String,
    documents: Mutex<Vec<Document>>,
    indexes: Mutex<Vec<IndexDefinition>>,
    insert_calls: AtomicUsize,
    failure: Option<String>,
}

impl MemorySink {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            documents: Mutex::new(Vec::new()),
            indexes: Mutex::new(Vec::new()),
            insert_calls: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// A sink that already holds `documents`.
    pub fn with_documents(collection: impl Into<String>, documents: Vec<Document>) -> Self {
        let sink = Self::new(collection);
        *sink.lock() = documents;
        sink
    }

    /// A sink whose every operation fails with `message`.
    pub fn failing(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(collection)
        }
    }

    /// Snapshot of the stored documents, in insertion order.
    pub fn documents(&self) -> Vec<Document> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Indexes ensured so far, without duplicates.
    pub fn indexes(&self) -> Vec<IndexDefinition> {
        self.indexes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// How many times `insert_all` was called.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Document>> {
        // A panicking test may poison the lock; the data is still usable.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_failure(&self) -> Result<(), SinkError> {
        match &self.failure {
            Some(message) => Err(self.write_error(message.clone())),
            None => Ok(()),
        }
    }

    fn write_error(&self, message: String) -> SinkError {
        SinkError::Write {
            collection: self.collection.clone(),
            message,
        }
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn insert_all(&self, records: &[ValidatedRecord]) -> Result<u64, SinkError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut documents = self.lock();
        for (written, record) in records.iter().enumerate() {
            if let Some(id) = record.get("_id") {
                if documents.iter().any(|doc| doc.get("_id") == Some(id)) {
                    return Err(self
                        .write_error(format!("duplicate key _id: {id}"))
                        .after_inserting(written as u64));
                }
            }
            documents.push(record.as_map().clone());
        }
        Ok(records.len() as u64)
    }

    async fn ensure_indexes(&self, indexes: &[IndexDefinition]) -> Result<(), SinkError> {
        self.check_failure()?;

        let mut ensured = self
            .indexes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for index in indexes {
            if !ensured.contains(index) {
                ensured.push(index.clone());
            }
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, SinkError> {
        self.check_failure()?;

        let mut documents = self.lock();
        let deleted = documents.len() as u64;
        documents.clear();
        Ok(deleted)
    }
}
