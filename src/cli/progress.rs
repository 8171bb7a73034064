//! CLI submission hooks with styled output and a spinner

use crate::cli::style::{check, cross, hyperlink_url, spinner_style, Stream, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use vibe_funnel::catalog::Catalog;
use vibe_funnel::submit::{SubmissionHooks, SubmissionStatus};
use vibe_funnel::types::AppEntry;

/// CLI hooks: a spinner while busy, one line per milestone
///
/// Completed entries are added to the in-memory catalog.
pub struct CliProgress {
    spinner: ProgressBar,
    catalog: Mutex<Catalog>,
}

impl CliProgress {
    /// Create hooks backed by the seeded catalog
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self {
            spinner,
            catalog: Mutex::new(Catalog::seeded()),
        }
    }

    /// Number of apps currently listed
    pub fn listed(&self) -> usize {
        self.catalog
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionHooks for CliProgress {
    async fn on_status(&self, status: &SubmissionStatus) {
        match status {
            SubmissionStatus::Idle => {}
            SubmissionStatus::CheckingQuality
            | SubmissionStatus::RequestingUploadTarget
            | SubmissionStatus::Uploading
            | SubmissionStatus::WaitingForReadiness { .. } => {
                self.spinner.set_message(format!("{status}..."));
            }
            SubmissionStatus::Ready { deployed_url } => {
                self.spinner.finish_and_clear();
                println!(
                    "{} Deployment is {}: {}",
                    check(),
                    "live".success(),
                    hyperlink_url(Stream::Stdout, deployed_url)
                );
            }
            SubmissionStatus::Failed { message } => {
                self.spinner.finish_and_clear();
                eprintln!("{} {}", cross(), message.error());
            }
        }
    }

    async fn on_entry_added(&self, entry: AppEntry) {
        self.spinner.suspend(|| {
            println!(
                "{} Uploaded {} (vibe score {})",
                check(),
                entry.name.emphasis(),
                entry.vibe_score.accent()
            );
            println!("  {}", entry.description.muted());
        });
        self.catalog
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(entry);
    }

    async fn on_settled(&self, _status: &SubmissionStatus) {
        self.spinner.finish_and_clear();
    }
}
