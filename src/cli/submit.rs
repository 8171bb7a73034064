//! Submit command - upload an app and wait for its deployment

use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use anstream::{eprintln, println};
use std::path::Path;
use tracing::debug;
use vibe_funnel::config::DeployConfig;
use vibe_funnel::error::Result;
use vibe_funnel::submit::{SubmissionStatus, Submitter};
use vibe_funnel::types::{Artifact, SubmissionRequest};

/// Run the submit command
///
/// Returns whether the deployment ended up reachable. Ctrl-C cancels the
/// attempt.
pub async fn run_submit(
    config: DeployConfig,
    name: &str,
    artifact: Option<&Path>,
    author: Option<&str>,
    description: Option<&str>,
) -> Result<bool> {
    let mut request = SubmissionRequest::new(name)
        .with_author(author)
        .with_description(description);
    if let Some(path) = artifact {
        request = request.with_artifact(Artifact::from_path(path).await?);
    }

    if request.app_name != name {
        println!(
            "Submitting as {} (names use lowercase letters and digits only)",
            request.app_name.accent()
        );
    }

    let submitter = Submitter::from_config(config)?;
    let progress = CliProgress::new();

    let attempt = submitter.submit(request, &progress);
    tokio::pin!(attempt);

    let status = tokio::select! {
        status = &mut attempt => status?,
        _ = tokio::signal::ctrl_c() => {
            debug!(event = "cli.interrupt");
            submitter.cancel();
            attempt.await?
        }
    };

    match status {
        SubmissionStatus::Ready { .. } => {
            println!("{} apps listed", progress.listed().accent());
            Ok(true)
        }
        SubmissionStatus::Idle => {
            eprintln!("{}", "Submission cancelled".warn());
            Ok(false)
        }
        _ => Ok(false),
    }
}
