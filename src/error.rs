//! Error taxonomy shared by the lookup, catalog and ranking stages.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinderError>;

#[derive(Debug, Error)]
pub enum FinderError {
    /// No record in the coordinate source matched the normalized postcode.
    #[error("postcode not found: {postcode}")]
    PostcodeNotFound { postcode: String },

    #[error("source file unavailable: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read failure part way through a scan.
    #[error("failed reading {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed record in {} at line {line}: {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("invalid catalog source {}: {reason}", path.display())]
    InvalidInputShape { path: PathBuf, reason: String },
}

impl FinderError {
    /// True for the one error kind callers may choose to skip over.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FinderError::PostcodeNotFound { .. })
    }
}
