use std::path::PathBuf;

use thiserror::Error;

/// Every failure a loader or client operation can hand back to its caller.
#[derive(Error, Debug)]
pub enum QuiverError {
    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status} ({url})")]
    Fetch {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not JSON, or not the shape the operation expects.
    #[error("could not decode {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// Relative normalization needs a first sample to use as the origin.
    #[error("dataset {resource} has no samples")]
    EmptyDataset { resource: String },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl QuiverError {
    /// HTTP status carried by a [`QuiverError::Fetch`].
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            QuiverError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuiverError>;
