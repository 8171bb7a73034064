//! Mock deployment collaborators for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use vibe_funnel::deploy::{DeployService, ProbeResponse, ReadinessProbe};
use vibe_funnel::error::{Error, Result};
use vibe_funnel::quality::QualityCheck;
use vibe_funnel::types::{QualityReport, UploadTarget};

/// Call record for `upload_artifact`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub upload_url: String,
    pub len: usize,
    pub content_type: String,
}

/// How the mock answers readiness probes
#[derive(Debug, Clone, Copy)]
pub enum ProbeBehavior {
    /// 200 on the n-th probe (1-based), 503 before
    ReadyOn(u32),
    /// Always this status
    Always(u16),
    /// Completed request with a hidden status
    Opaque,
    /// Transport failure every time
    Unreachable,
}

/// Simple mock deploy service for testing
///
/// Features:
/// - Call tracking for verification
/// - Configurable probe behavior
/// - Error injection for failure path testing
pub struct MockDeployService {
    probe_behavior: Mutex<ProbeBehavior>,
    // Call tracking
    target_calls: Mutex<Vec<String>>,
    upload_calls: Mutex<Vec<UploadCall>>,
    probe_calls: Mutex<Vec<String>>,
    // Error injection
    target_status: Mutex<Option<u16>>,
    upload_failure: Mutex<Option<(u16, String)>>,
    // Slows the upload so tests can observe the in-flight state
    upload_delay: Mutex<Option<Duration>>,
    uploads_started: AtomicU32,
}

impl Default for MockDeployService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDeployService {
    /// Mock whose deployment is reachable on the first probe
    pub fn new() -> Self {
        Self {
            probe_behavior: Mutex::new(ProbeBehavior::ReadyOn(1)),
            target_calls: Mutex::new(Vec::new()),
            upload_calls: Mutex::new(Vec::new()),
            probe_calls: Mutex::new(Vec::new()),
            target_status: Mutex::new(None),
            upload_failure: Mutex::new(None),
            upload_delay: Mutex::new(None),
            uploads_started: AtomicU32::new(0),
        }
    }

    // === Behavior ===

    /// Change how probes are answered
    pub fn set_probe_behavior(&self, behavior: ProbeBehavior) {
        *self.probe_behavior.lock().unwrap() = behavior;
    }

    /// Make `request_upload_target` answer with a non-2xx status
    pub fn fail_upload_target(&self, status: u16) {
        *self.target_status.lock().unwrap() = Some(status);
    }

    /// Make `upload_artifact` answer with a non-2xx status and body
    pub fn fail_upload(&self, status: u16, body: &str) {
        *self.upload_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    /// Delay `upload_artifact` by `delay`
    pub fn delay_upload(&self, delay: Duration) {
        *self.upload_delay.lock().unwrap() = Some(delay);
    }

    // === Call verification ===

    /// App names `request_upload_target` was called with
    pub fn target_calls(&self) -> Vec<String> {
        self.target_calls.lock().unwrap().clone()
    }

    /// All `upload_artifact` calls
    pub fn upload_calls(&self) -> Vec<UploadCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    /// URLs probed so far
    pub fn probe_calls(&self) -> Vec<String> {
        self.probe_calls.lock().unwrap().clone()
    }

    /// Number of probes so far
    pub fn probe_count(&self) -> usize {
        self.probe_calls.lock().unwrap().len()
    }

    /// Total calls across every network operation
    pub fn network_calls(&self) -> usize {
        self.target_calls.lock().unwrap().len()
            + self.upload_calls.lock().unwrap().len()
            + self.probe_count()
    }

    /// Assert that no network operation was attempted
    pub fn assert_no_network_calls(&self) {
        assert_eq!(
            self.network_calls(),
            0,
            "expected no network calls, got targets={:?} uploads={:?} probes={:?}",
            self.target_calls(),
            self.upload_calls(),
            self.probe_calls()
        );
    }
}

#[async_trait]
impl DeployService for MockDeployService {
    async fn request_upload_target(&self, app_name: &str) -> Result<UploadTarget> {
        self.target_calls.lock().unwrap().push(app_name.to_string());

        if let Some(status) = *self.target_status.lock().unwrap() {
            return Err(Error::UploadTarget { status });
        }

        Ok(UploadTarget {
            upload_url: format!("https://bucket.test/{app_name}.zip?sig=abc"),
            object_key: format!("apps/{app_name}.zip"),
        })
    }

    async fn upload_artifact(
        &self,
        target: &UploadTarget,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<()> {
        self.uploads_started.fetch_add(1, Ordering::SeqCst);
        let delay = *self.upload_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.upload_calls.lock().unwrap().push(UploadCall {
            upload_url: target.upload_url.clone(),
            len: bytes.len(),
            content_type: content_type.to_string(),
        });

        if let Some((status, body)) = self.upload_failure.lock().unwrap().clone() {
            return Err(Error::Upload {
                status,
                body_excerpt: body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReadinessProbe for MockDeployService {
    async fn probe(&self, url: &str) -> Result<ProbeResponse> {
        let attempt = {
            let mut calls = self.probe_calls.lock().unwrap();
            calls.push(url.to_string());
            u32::try_from(calls.len()).unwrap()
        };

        match *self.probe_behavior.lock().unwrap() {
            ProbeBehavior::ReadyOn(n) if attempt >= n => Ok(ProbeResponse::with_status(200)),
            ProbeBehavior::ReadyOn(_) => Ok(ProbeResponse::with_status(503)),
            ProbeBehavior::Always(status) => Ok(ProbeResponse::with_status(status)),
            ProbeBehavior::Opaque => Ok(ProbeResponse::opaque()),
            ProbeBehavior::Unreachable => Err(Error::Parse("connection refused".to_string())),
        }
    }
}

/// Quality check returning a fixed report, or a fixed failure
pub struct MockQualityCheck {
    score: u8,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockQualityCheck {
    /// Always scores `score` and echoes the trimmed description
    pub fn scoring(score: u8) -> Self {
        Self {
            score,
            failure: None,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::scoring(0)
        }
    }

    /// Takes `delay` before answering
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::scoring(70)
        }
    }

    /// `(name, description)` pairs evaluated so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QualityCheck for MockQualityCheck {
    async fn evaluate(&self, name: &str, description: &str) -> Result<QualityReport> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), description.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(msg) = &self.failure {
            return Err(Error::QualityCheck(msg.clone()));
        }

        Ok(QualityReport {
            score: self.score,
            normalized_description: description.trim().to_string(),
        })
    }
}
