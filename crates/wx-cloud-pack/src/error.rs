//! Error types for package generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while emitting generated files
#[derive(Error, Debug)]
pub enum PackError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Emission task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
