//! Deployment submission engine
//!
//! Handles the workflow of submitting an app for deployment:
//! 1. Validation - local checks on the name and artifact
//! 2. Upload - obtain a one-time target and transfer the artifact
//! 3. Readiness - poll the deployment until it answers or time runs out

mod execute;
mod hooks;
mod poll;
mod status;
mod validate;

pub use execute::Submitter;
pub use hooks::{NoopHooks, SubmissionHooks};
pub use poll::{classify_probe, poll_until_ready, PollOutcome, PollResult};
pub use status::SubmissionStatus;
pub use validate::{sanitize_app_name, validate_app_name, validate_artifact};
