//! Submission execution
//!
//! Runs one attempt: quality check, upload target, upload, readiness.

use crate::config::{DeployConfig, ARTIFACT_CONTENT_TYPE};
use crate::deploy::{DeployService, HttpDeployService, ReadinessProbe};
use crate::error::Error;
use crate::quality::{HeuristicQualityCheck, QualityCheck};
use crate::submit::poll::{poll_until_ready, PollResult};
use crate::submit::validate::{validate_app_name, validate_artifact};
use crate::submit::{SubmissionHooks, SubmissionStatus};
use crate::types::{AppEntry, AppStage, QualityReport, SubmissionRequest};
use chrono::Utc;
use rand::Rng;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Orchestrates deployment submissions
///
/// One instance runs at most one attempt at a time. Status is published on a
/// watch channel (see [`Submitter::subscribe`]) and through the hooks passed
/// to [`Submitter::submit`].
pub struct Submitter {
    deploy: Arc<dyn DeployService>,
    probe: Arc<dyn ReadinessProbe>,
    quality: Arc<dyn QualityCheck>,
    config: DeployConfig,
    status: watch::Sender<SubmissionStatus>,
    in_flight: AtomicBool,
    cancel: Mutex<CancellationToken>,
}

/// Releases the reentrancy flag when an attempt ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Per-attempt context
struct Attempt<'a> {
    submitter: &'a Submitter,
    hooks: &'a dyn SubmissionHooks,
    cancel: CancellationToken,
}

impl Attempt<'_> {
    /// Publish a transition unless the attempt was cancelled
    async fn transition(&self, status: SubmissionStatus) -> bool {
        // Checked under the channel lock so a concurrent cancel() always wins
        let published = self.submitter.status.send_if_modified(|current| {
            if self.cancel.is_cancelled() {
                return false;
            }
            *current = status.clone();
            true
        });
        if published {
            self.hooks.on_status(&status).await;
        }
        published
    }

    /// Run a step, giving up as soon as the attempt is cancelled
    async fn step<T>(&self, fut: impl Future<Output = T>) -> Option<T> {
        tokio::select! {
            () = self.cancel.cancelled() => None,
            out = fut => Some(out),
        }
    }

    async fn fail(&self, message: String) -> SubmissionStatus {
        warn!(event = "submit.failed", %message);
        let status = SubmissionStatus::Failed { message };
        self.transition(status.clone()).await;
        status
    }
}

impl Submitter {
    /// Create a submitter from its collaborators
    pub fn new(
        deploy: Arc<dyn DeployService>,
        probe: Arc<dyn ReadinessProbe>,
        quality: Arc<dyn QualityCheck>,
        config: DeployConfig,
    ) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            deploy,
            probe,
            quality,
            config,
            status,
            in_flight: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Create a submitter talking HTTP, scored by the local heuristic
    pub fn from_config(config: DeployConfig) -> crate::error::Result<Self> {
        config.validate()?;
        let http = Arc::new(HttpDeployService::new(&config)?);
        Ok(Self::new(
            http.clone(),
            http,
            Arc::new(HeuristicQualityCheck),
            config,
        ))
    }

    /// Subscribe to status transitions
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    /// Current status
    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    /// Configuration this submitter runs with
    pub const fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Whether an attempt is running
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Stop the running attempt, if any, and return to `Idle`
    ///
    /// The attempt publishes no further transitions, its poller stops, and
    /// the entry hook is not called for it.
    pub fn cancel(&self) {
        // Held across the publish so a starting attempt is either cancelled
        // or publishes after `Idle`
        let token = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        if !token.is_cancelled() {
            token.cancel();
            if self.is_in_flight() {
                info!(event = "submit.cancelled");
            }
        }
        self.status.send_replace(SubmissionStatus::Idle);
    }

    /// Acknowledge a finished attempt and return to `Idle`
    ///
    /// Does nothing while an attempt is running.
    pub fn reset(&self) {
        if !self.is_in_flight() {
            self.status.send_replace(SubmissionStatus::Idle);
        }
    }

    /// Run one submission attempt to completion
    ///
    /// Dropping the returned future abandons the attempt: pending requests
    /// and the poller stop with it, the in-flight flag is released, and the
    /// last published status stays until [`Submitter::reset`].
    ///
    /// Returns the terminal status (`Ready` or `Failed`), or `Idle` if the
    /// attempt was cancelled. Workflow failures never surface as `Err`; the
    /// only error is [`Error::SubmissionInProgress`] when another attempt is
    /// running on this instance.
    pub async fn submit(
        &self,
        request: SubmissionRequest,
        hooks: &dyn SubmissionHooks,
    ) -> crate::error::Result<SubmissionStatus> {
        // Claim the flag and install the token under one lock, so cancel()
        // never lands between them
        let cancel = {
            let mut current = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
            if self
                .in_flight
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                warn!(event = "submit.rejected", app = %request.app_name, "submission already in flight");
                return Err(Error::SubmissionInProgress);
            }
            *current = CancellationToken::new();
            current.clone()
        };
        let _guard = InFlightGuard(&self.in_flight);

        let attempt = Attempt {
            submitter: self,
            hooks,
            cancel,
        };

        info!(event = "submit.start", app = %request.app_name);
        let status = self.run(&attempt, request).await;
        let status = if attempt.cancel.is_cancelled() {
            SubmissionStatus::Idle
        } else {
            status
        };

        hooks.on_settled(&status).await;
        Ok(status)
    }

    async fn run(&self, attempt: &Attempt<'_>, request: SubmissionRequest) -> SubmissionStatus {
        let SubmissionRequest {
            app_name,
            author,
            description,
            artifact,
        } = request;

        // 1. Name
        if let Err(e) = validate_app_name(&app_name) {
            return attempt.fail(e.to_string()).await;
        }

        // 2. Quality check
        if !attempt.transition(SubmissionStatus::CheckingQuality).await {
            return SubmissionStatus::Idle;
        }
        let Some(report) = attempt.step(self.check_quality(&app_name, &description)).await else {
            return SubmissionStatus::Idle;
        };
        let report = match report {
            Ok(r) => r,
            Err(e) => return attempt.fail(e.to_string()).await,
        };

        // 3. Entry
        let deployed_url = self.config.deployment_url(&app_name);
        let entry = build_entry(&app_name, &author, &deployed_url, report);

        // 4. Artifact
        let artifact = match validate_artifact(artifact.as_ref()) {
            Ok(a) => a,
            Err(e) => return attempt.fail(e.to_string()).await,
        };

        // 5. Upload target
        if !attempt
            .transition(SubmissionStatus::RequestingUploadTarget)
            .await
        {
            return SubmissionStatus::Idle;
        }
        let Some(target) = attempt
            .step(self.deploy.request_upload_target(&app_name))
            .await
        else {
            return SubmissionStatus::Idle;
        };
        let target = match target {
            Ok(t) => t,
            Err(e) => return attempt.fail(upload_target_message(&e)).await,
        };

        // 6. Upload
        if !attempt.transition(SubmissionStatus::Uploading).await {
            return SubmissionStatus::Idle;
        }
        let Some(uploaded) = attempt
            .step(
                self.deploy
                    .upload_artifact(&target, &artifact.bytes, ARTIFACT_CONTENT_TYPE),
            )
            .await
        else {
            return SubmissionStatus::Idle;
        };
        if let Err(e) = uploaded {
            return attempt.fail(e.to_string()).await;
        }
        info!(event = "submit.uploaded", app = %app_name, key = %target.object_key, size_bytes = artifact.len());

        // The entry is listed once the upload lands, before the link is live
        if attempt.cancel.is_cancelled() {
            return SubmissionStatus::Idle;
        }
        attempt.hooks.on_entry_added(entry).await;

        // 7-9. Readiness
        let probe_url = self.config.probe_url(&app_name);
        match self.wait_for_readiness(attempt, &probe_url).await {
            Some(PollResult::Reachable) => {
                info!(event = "submit.ready", app = %app_name, url = %deployed_url);
                let status = SubmissionStatus::Ready { deployed_url };
                attempt.transition(status.clone()).await;
                status
            }
            Some(PollResult::TimedOut) => {
                let waited_secs = self.config.poll.timeout.as_secs();
                attempt
                    .fail(Error::NotReachable { waited_secs }.to_string())
                    .await
            }
            Some(PollResult::Cancelled) | None => SubmissionStatus::Idle,
        }
    }

    async fn check_quality(
        &self,
        name: &str,
        description: &str,
    ) -> crate::error::Result<QualityReport> {
        tokio::time::timeout(
            self.config.quality_timeout,
            self.quality.evaluate(name, description),
        )
        .await
        .map_err(|_| {
            Error::QualityCheck(format!(
                "quality check timed out after {}s",
                self.config.quality_timeout.as_secs()
            ))
        })?
    }

    /// Poll the probe URL, ticking `elapsed_seconds` once per second meanwhile
    ///
    /// Returns `None` when cancelled or when the poller rejects its options.
    async fn wait_for_readiness(&self, attempt: &Attempt<'_>, probe_url: &str) -> Option<PollResult> {
        if !attempt
            .transition(SubmissionStatus::WaitingForReadiness { elapsed_seconds: 0 })
            .await
        {
            return None;
        }

        let poll = poll_until_ready(
            self.probe.as_ref(),
            probe_url,
            self.config.poll,
            &attempt.cancel,
        );
        tokio::pin!(poll);

        let second = Duration::from_secs(1);
        let mut ticker = interval_at(Instant::now() + second, second);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut elapsed_seconds = 0;

        loop {
            tokio::select! {
                result = &mut poll => {
                    return match result {
                        Ok(r) => Some(r),
                        Err(e) => {
                            warn!(event = "submit.poll_rejected", error = %e);
                            None
                        }
                    };
                }
                _ = ticker.tick() => {
                    elapsed_seconds += 1;
                    attempt
                        .transition(SubmissionStatus::WaitingForReadiness { elapsed_seconds })
                        .await;
                }
            }
        }
    }
}

/// Build the catalog entry for a submission
fn build_entry(app_name: &str, author: &str, link: &str, report: QualityReport) -> AppEntry {
    AppEntry {
        id: uuid::Uuid::new_v4().to_string(),
        name: app_name.to_string(),
        link: link.to_string(),
        author: author.to_string(),
        likes: rand::thread_rng().gen_range(1..=50),
        contributors: None,
        user_count: None,
        vibe_score: report.score.min(100),
        description: report.normalized_description,
        timestamp: Utc::now(),
        stage: AppStage::Vibe,
    }
}

fn upload_target_message(err: &Error) -> String {
    match err {
        Error::UploadTarget { .. } => err.to_string(),
        other => format!("could not obtain upload target: {other}"),
    }
}
