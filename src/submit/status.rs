//! Submission status state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current state of a submission attempt
///
/// Transitions run strictly forward through the workflow. `Failed` can be
/// entered from any non-terminal state, `Idle` is the reset state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SubmissionStatus {
    /// Nothing running
    #[default]
    Idle,
    /// Quality check in progress
    CheckingQuality,
    /// Asking for an upload target
    RequestingUploadTarget,
    /// Transferring the artifact
    Uploading,
    /// Polling the deployment
    #[serde(rename_all = "camelCase")]
    WaitingForReadiness {
        /// Seconds since polling started (display only)
        elapsed_seconds: u64,
    },
    /// Deployment is reachable
    #[serde(rename_all = "camelCase")]
    Ready {
        /// Public URL of the deployment
        deployed_url: String,
    },
    /// Attempt failed
    Failed {
        /// Human-readable reason
        message: String,
    },
}

impl SubmissionStatus {
    /// Whether the attempt has finished (`Ready` or `Failed`)
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Failed { .. })
    }

    /// Whether an attempt is running
    pub const fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle) && !self.is_terminal()
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::CheckingQuality => write!(f, "Checking vibe"),
            Self::RequestingUploadTarget => write!(f, "Requesting upload target"),
            Self::Uploading => write!(f, "Uploading artifact"),
            Self::WaitingForReadiness { elapsed_seconds } => {
                write!(f, "Waiting for deployment ({elapsed_seconds}s)")
            }
            Self::Ready { deployed_url } => write!(f, "Ready at {deployed_url}"),
            Self::Failed { message } => write!(f, "Failed: {message}"),
        }
    }
}
