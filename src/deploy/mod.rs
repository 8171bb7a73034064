//! Deployment services
//!
//! Provides the upload target client and the readiness probe behind traits,
//! so the submission workflow can run against HTTP or an in-memory fake.

mod http;

pub use http::{HttpDeployService, BODY_EXCERPT_LIMIT};

use crate::error::Result;
use crate::types::UploadTarget;
use async_trait::async_trait;

/// Upload target client
///
/// Both operations are single-attempt; callers decide whether to retry.
#[async_trait]
pub trait DeployService: Send + Sync {
    /// Obtain a one-time upload target for an app
    async fn request_upload_target(&self, app_name: &str) -> Result<UploadTarget>;

    /// Transfer the artifact bytes to a previously issued target
    async fn upload_artifact(
        &self,
        target: &UploadTarget,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<()>;
}

/// What a completed probe request revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status, or `None` when the response was opaque
    pub status: Option<u16>,
}

impl ProbeResponse {
    /// A probe that completed with a visible status code
    pub const fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// A probe that completed but whose status could not be inspected
    pub const fn opaque() -> Self {
        Self { status: None }
    }
}

/// Lightweight reachability check against a deployed URL
///
/// `Err` means the request failed at the transport level.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Issue one probe request
    async fn probe(&self, url: &str) -> Result<ProbeResponse>;
}
