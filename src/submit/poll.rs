//! Readiness polling
//!
//! Repeatedly probes a deployed URL until it answers or a deadline passes.

use crate::config::PollOptions;
use crate::deploy::{ProbeResponse, ReadinessProbe};
use crate::error::{Error, Result};
use tokio::time::{sleep_until, timeout_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Verdict of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The deployment answered
    Reachable,
    /// Try again later
    NotYetReachable,
}

/// Aggregate result of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    /// A probe succeeded
    Reachable,
    /// The deadline passed without a successful probe
    TimedOut,
    /// The owner cancelled polling
    Cancelled,
}

/// Classify one probe result
///
/// A probe that completed without a visible status counts as reachable:
/// cross-origin style responses hide the status, and treating them as
/// failures would keep a live deployment "unreachable" forever. The cost is
/// an occasional early positive.
pub fn classify_probe(result: &Result<ProbeResponse>) -> PollOutcome {
    match result {
        Ok(ProbeResponse { status: None }) => PollOutcome::Reachable,
        Ok(ProbeResponse {
            status: Some(code),
        }) if (200..300).contains(code) => PollOutcome::Reachable,
        Ok(_) | Err(_) => PollOutcome::NotYetReachable,
    }
}

/// Probe `url` every `options.interval` until it is reachable, the deadline
/// `options.timeout` passes, or `cancel` fires
///
/// The deadline bounds the whole run, including a probe still in flight.
/// Not-yet-ready is never an error; `Err` is only returned for unusable
/// arguments. A probe already in flight when `cancel` fires is allowed to
/// finish, its result is discarded.
pub async fn poll_until_ready(
    probe: &dyn ReadinessProbe,
    url: &str,
    options: PollOptions,
    cancel: &CancellationToken,
) -> Result<PollResult> {
    if url.is_empty() {
        return Err(Error::InvalidPollOptions("probe URL is empty".to_string()));
    }
    if options.interval.is_zero() {
        return Err(Error::InvalidPollOptions(
            "interval must be greater than zero".to_string(),
        ));
    }

    let deadline = Instant::now() + options.timeout;
    let mut attempts: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            debug!(event = "poll.cancelled", %url, attempts);
            return Ok(PollResult::Cancelled);
        }
        if Instant::now() >= deadline {
            info!(event = "poll.timed_out", %url, attempts);
            return Ok(PollResult::TimedOut);
        }

        attempts += 1;
        // A slow probe never outlives the deadline
        let Ok(result) = timeout_at(deadline, probe.probe(url)).await else {
            info!(event = "poll.timed_out", %url, attempts, "probe still pending at deadline");
            return Ok(PollResult::TimedOut);
        };

        if cancel.is_cancelled() {
            debug!(event = "poll.cancelled", %url, attempts);
            return Ok(PollResult::Cancelled);
        }

        match classify_probe(&result) {
            PollOutcome::Reachable => {
                info!(event = "poll.reachable", %url, attempts);
                return Ok(PollResult::Reachable);
            }
            PollOutcome::NotYetReachable => match &result {
                Ok(response) => debug!(event = "poll.not_ready", %url, status = ?response.status),
                Err(e) => debug!(event = "poll.not_ready", %url, error = %e),
            },
        }

        let next_probe = (Instant::now() + options.interval).min(deadline);
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(event = "poll.cancelled", %url, attempts);
                return Ok(PollResult::Cancelled);
            }
            () = sleep_until(next_probe) => {}
        }
    }
}
