//! Failure taxonomy for the I/O boundary
//!
//! The simulation itself never fails. Everything here is recoverable: asset
//! failures degrade to placeholders or silence, persistence failures lose at
//! most the current session's best score.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An asset could not be loaded; the caller falls back to placeholder geometry or silence
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {path} not found")]
    Missing { path: PathBuf },
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed mask in {path}: {reason}")]
    MalformedMask { path: PathBuf, reason: String },
}

/// Reading or writing persisted state failed
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage i/o failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("stored value in {path} is malformed: {contents:?}")]
    Malformed { path: PathBuf, contents: String },
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
