//! Document store sinks for mongo-seed.
//!
//! [`DocumentSink`] is the seam between the import pipeline and the store.
//! [`MongoSink`] implements it on top of the official MongoDB driver and owns
//! the single client connection for a run.

mod error;
mod mongo;
mod traits;

pub use error::SinkError;
pub use mongo::{index_model, record_to_document, MongoOpts, MongoSink};
pub use traits::DocumentSink;
