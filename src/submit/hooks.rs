//! Hook trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, web server, etc.) to follow
//! a submission attempt and receive its result.

use crate::submit::SubmissionStatus;
use crate::types::AppEntry;
use async_trait::async_trait;

/// Submission hooks
///
/// Implement this trait to follow a submission attempt.
/// - CLI implementations can print to terminal and keep a catalog
/// - Web servers can forward statuses over SSE or WebSocket messages
#[async_trait]
pub trait SubmissionHooks: Send + Sync {
    /// Called on every status transition, in order
    async fn on_status(&self, status: &SubmissionStatus);

    /// Called once with the finished entry after the artifact upload succeeds
    ///
    /// The deployment may not be reachable yet when this fires.
    async fn on_entry_added(&self, entry: AppEntry);

    /// Called exactly once per attempt when it stops, whatever the outcome
    async fn on_settled(&self, status: &SubmissionStatus);
}

/// No-op hooks for testing or when only the returned status matters
pub struct NoopHooks;

#[async_trait]
impl SubmissionHooks for NoopHooks {
    async fn on_status(&self, _status: &SubmissionStatus) {}
    async fn on_entry_added(&self, _entry: AppEntry) {}
    async fn on_settled(&self, _status: &SubmissionStatus) {}
}
