//! Error types for document sinks.

use thiserror::Error;

/// Errors raised by the store, as opposed to data-quality rejections found
/// before the store is touched.
#[derive(Error, Debug)]
pub enum SinkError {
    /// MongoDB connection or command error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// A record could not be encoded as BSON.
    #[error("Failed to encode record as BSON: {0}")]
    Encode(#[from] bson::ser::Error),

    /// Neither the options nor the connection string name a database.
    #[error("No database selected: pass --database or include one in the connection string")]
    NoDatabase,

    /// Write rejected by a non-MongoDB sink.
    #[error("Write to '{collection}' failed: {message}")]
    Write { collection: String, message: String },

    /// A bulk insert stopped part-way; the first `inserted` documents are stored.
    #[error("{source}")]
    PartialWrite {
        inserted: u64,
        #[source]
        source: Box<SinkError>,
    },
}

impl SinkError {
    /// Documents that reached the store before this error.
    pub fn inserted(&self) -> u64 {
        match self {
            SinkError::PartialWrite { inserted, .. } => *inserted,
            _ => 0,
        }
    }

    /// Wrap `self` with the number of documents already written, if any.
    pub fn after_inserting(self, inserted: u64) -> Self {
        if inserted == 0 {
            self
        } else {
            SinkError::PartialWrite {
                inserted,
                source: Box::new(self),
            }
        }
    }
}
