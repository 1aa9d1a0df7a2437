use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Manifest directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("No version marker found in {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version record {path}: {reason}")]
    InvalidSidecar { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Failed to create HTTP client: {0}")]
    Client(reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed release response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Release response has no tag_name")]
    MissingTag,
}

/// Broad class of a failed check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    NotFound,
    Transport,
    Parse,
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Configuration(LocateError),

    #[error(transparent)]
    NotFound(LocateError),

    #[error("Failed to fetch the latest release: {0}")]
    Transport(#[from] FetchError),

    #[error("Failed to parse the latest release: {0}")]
    Parse(#[from] ParseError),

    #[error("Unable to find the current SDK version")]
    LocalVersionUnavailable,

    #[error("Version is not comparable: {0}")]
    InvalidVersion(String),
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::Configuration(_) => ErrorKind::Configuration,
            CheckError::NotFound(_) | CheckError::LocalVersionUnavailable => ErrorKind::NotFound,
            CheckError::Transport(_) => ErrorKind::Transport,
            CheckError::Parse(_) | CheckError::InvalidVersion(_) => ErrorKind::Parse,
        }
    }
}

impl From<LocateError> for CheckError {
    fn from(err: LocateError) -> Self {
        match err {
            LocateError::NotFound(_) => CheckError::NotFound(err),
            _ => CheckError::Configuration(err),
        }
    }
}
