//! Local filesystem JSON reader

use crate::FileError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// Reads whole local files; inputs are expected to fit in memory.
pub struct LocalFileReader;

impl LocalFileReader {
    /// Read `path` and decode it as a single JSON document.
    pub async fn read_json(path: impl AsRef<Path>) -> Result<Value, FileError> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
            _ => FileError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        tracing::debug!("Read {} bytes from {}", contents.len(), path.display());

        serde_json::from_slice(&contents).map_err(|e| FileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
