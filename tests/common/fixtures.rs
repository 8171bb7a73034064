//! Test data factories for vibe-funnel types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use super::mock_deploy::{MockDeployService, MockQualityCheck};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vibe_funnel::config::{DeployConfig, PollOptions, MAX_ARTIFACT_BYTES};
use vibe_funnel::submit::{SubmissionHooks, SubmissionStatus, Submitter};
use vibe_funnel::types::{AppEntry, Artifact, SubmissionRequest};

/// Deployment URL template used throughout the tests
pub const DEPLOY_TEMPLATE: &str = "https://{app}.apps.test";

/// Probe URL template used throughout the tests
pub const PROBE_TEMPLATE: &str = "https://{app}.apps.test/index.html";

/// Small zip-looking artifact
pub fn make_artifact() -> Artifact {
    Artifact::new("app.zip", b"PK\x03\x04 demo".to_vec())
}

/// Artifact one byte over the size limit
pub fn make_oversized_artifact() -> Artifact {
    Artifact::new("huge.zip", vec![0; MAX_ARTIFACT_BYTES + 1])
}

/// Complete request with an artifact attached
pub fn make_request(raw_name: &str) -> SubmissionRequest {
    SubmissionRequest::new(raw_name)
        .with_author(Some("Ada"))
        .with_description(Some("A tiny todo list that vibes."))
        .with_artifact(make_artifact())
}

/// Config pointing at test hosts: 60s deadline, 3s interval
pub fn test_config() -> DeployConfig {
    DeployConfig {
        upload_endpoint: "https://upload.test/upload-url".to_string(),
        deploy_url_template: DEPLOY_TEMPLATE.to_string(),
        probe_url_template: PROBE_TEMPLATE.to_string(),
        poll: PollOptions {
            timeout: Duration::from_secs(60),
            interval: Duration::from_secs(3),
        },
        ..DeployConfig::default()
    }
}

/// Submitter wired to a mock deploy service and a fixed quality score
pub fn make_submitter(deploy: &Arc<MockDeployService>) -> Submitter {
    make_submitter_with(deploy, MockQualityCheck::scoring(80), test_config())
}

/// Submitter with an explicit quality check and config
pub fn make_submitter_with(
    deploy: &Arc<MockDeployService>,
    quality: MockQualityCheck,
    config: DeployConfig,
) -> Submitter {
    Submitter::new(deploy.clone(), deploy.clone(), Arc::new(quality), config)
}

/// Hooks that record every callback
#[derive(Default)]
pub struct RecordingHooks {
    statuses: Mutex<Vec<SubmissionStatus>>,
    entries: Mutex<Vec<AppEntry>>,
    settled: Mutex<Vec<SubmissionStatus>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every status reported through `on_status`, in order
    pub fn statuses(&self) -> Vec<SubmissionStatus> {
        self.statuses.lock().unwrap().clone()
    }

    /// Entries handed to `on_entry_added`
    pub fn entries(&self) -> Vec<AppEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Statuses handed to `on_settled`
    pub fn settled(&self) -> Vec<SubmissionStatus> {
        self.settled.lock().unwrap().clone()
    }

    /// `elapsed_seconds` of every waiting status, in order
    pub fn elapsed_ticks(&self) -> Vec<u64> {
        self.statuses()
            .into_iter()
            .filter_map(|s| match s {
                SubmissionStatus::WaitingForReadiness { elapsed_seconds } => Some(elapsed_seconds),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SubmissionHooks for RecordingHooks {
    async fn on_status(&self, status: &SubmissionStatus) {
        self.statuses.lock().unwrap().push(status.clone());
    }

    async fn on_entry_added(&self, entry: AppEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    async fn on_settled(&self, status: &SubmissionStatus) {
        self.settled.lock().unwrap().push(status.clone());
    }
}
