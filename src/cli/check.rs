//! Check command - poll an uploaded app until it answers

use crate::cli::style::{check, cross, hyperlink_url, spinner_style, Stream, Stylize};
use anstream::{eprintln, println};
use indicatif::ProgressBar;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vibe_funnel::config::DeployConfig;
use vibe_funnel::deploy::HttpDeployService;
use vibe_funnel::error::{Error, Result};
use vibe_funnel::submit::{poll_until_ready, sanitize_app_name, validate_app_name, PollResult};

/// Run the check command
///
/// Returns whether the deployment is reachable.
pub async fn run_check(config: &DeployConfig, name: &str) -> Result<bool> {
    let app_name = sanitize_app_name(name);
    validate_app_name(&app_name)?;

    let service = HttpDeployService::new(config)?;
    let probe_url = config.probe_url(&app_name);
    let deployed_url = config.deployment_url(&app_name);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Checking {}...", app_name.accent()));

    let cancel = CancellationToken::new();
    let poll = poll_until_ready(&service, &probe_url, config.poll, &cancel);
    tokio::pin!(poll);

    let result = tokio::select! {
        result = &mut poll => result?,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            poll.await?
        }
    };
    spinner.finish_and_clear();

    match result {
        PollResult::Reachable => {
            println!(
                "{} {} is {}: {}",
                check(),
                app_name.emphasis(),
                "live".success(),
                hyperlink_url(Stream::Stdout, &deployed_url)
            );
            Ok(true)
        }
        PollResult::TimedOut => {
            let err = Error::NotReachable {
                waited_secs: config.poll.timeout.as_secs(),
            };
            eprintln!("{} {}", cross(), err.to_string().error());
            Ok(false)
        }
        PollResult::Cancelled => {
            eprintln!("{}", "Check cancelled".warn());
            Ok(false)
        }
    }
}
