//! Error types for metadata export

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing metadata files
///
/// Compilation itself is total; only the file system can fail.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// A field without an API name has no file name
    #[error("Cannot export a field with an empty API name")]
    EmptyApiName,

    /// File system error
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}
