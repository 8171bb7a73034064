//! Error types for vibe-funnel

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Broad error classification, used by interfaces to pick wording and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed local input, never caused by a network call
    Validation,
    /// The quality check collaborator failed
    Service,
    /// The upload target endpoint refused the request
    UploadTarget,
    /// The artifact transfer was refused
    Upload,
    /// Transport-level failure (DNS, connection, timeout)
    Network,
    /// Readiness polling ran out of time
    Timeout,
    /// Caller misuse of the API
    Usage,
    /// Invalid configuration
    Config,
    /// Local filesystem failure
    Io,
}

/// Errors produced by the submission workflow and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// App name is empty or contains characters outside `[a-z0-9]`
    #[error("invalid app name '{0}': use lowercase letters and digits only")]
    InvalidAppName(String),

    /// No artifact attached to the request
    #[error("no artifact selected")]
    MissingArtifact,

    /// Artifact exceeds the upload cap
    #[error("artifact too large: {size} bytes (limit is {limit} bytes)")]
    ArtifactTooLarge {
        /// Actual artifact size
        size: usize,
        /// Maximum accepted size
        limit: usize,
    },

    /// Quality check collaborator failure, message passed through
    #[error("{0}")]
    QualityCheck(String),

    /// Upload target endpoint answered with a non-2xx status
    #[error("could not obtain upload target (HTTP {status})")]
    UploadTarget {
        /// HTTP status code
        status: u16,
    },

    /// Artifact transfer answered with a non-2xx status
    #[error("upload failed (HTTP {status}){}", excerpt_suffix(.body_excerpt))]
    Upload {
        /// HTTP status code
        status: u16,
        /// Start of the response body, for diagnostics
        body_excerpt: String,
    },

    /// Transport failure
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Deployment did not become reachable before the poll deadline
    #[error(
        "artifact uploaded, but the deployment is not reachable yet after {waited_secs}s; check again later"
    )]
    NotReachable {
        /// How long polling ran
        waited_secs: u64,
    },

    /// `submit` called while another attempt is in flight
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// Poller called with unusable options
    #[error("invalid poll options: {0}")]
    InvalidPollOptions(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Response parsing error
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAppName(_) | Self::MissingArtifact | Self::ArtifactTooLarge { .. } => {
                ErrorKind::Validation
            }
            Self::QualityCheck(_) => ErrorKind::Service,
            Self::UploadTarget { .. } => ErrorKind::UploadTarget,
            Self::Upload { .. } | Self::Parse(_) => ErrorKind::Upload,
            Self::Http(_) => ErrorKind::Network,
            Self::NotReachable { .. } => ErrorKind::Timeout,
            Self::SubmissionInProgress | Self::InvalidPollOptions(_) => ErrorKind::Usage,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

fn excerpt_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}
