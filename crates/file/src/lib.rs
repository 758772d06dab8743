//! Input file reader for mongo-seed.
//!
//! Reads a local JSON document into memory and decodes it, keeping "the file
//! is not there" and "the file is not JSON" apart so callers can report them
//! distinctly.
//!
//! # Example
//!
//! ```ignore
//! use seed_file::LocalFileReader;
//!
//! let document = LocalFileReader::read_json("stations.json").await?;
//! ```

mod local;

use std::path::PathBuf;

pub use local::LocalFileReader;

/// Errors raised while reading an input file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The path does not exist
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    /// The content is not valid JSON
    #[error("Failed to parse {} as JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other I/O failure (permissions, path is a directory, ...)
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
