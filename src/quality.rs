//! Quality check ("vibe check") for submitted apps
//!
//! The orchestrator only depends on the [`QualityCheck`] trait. A local
//! heuristic is provided so the workflow runs without an external scorer.

use crate::error::{Error, Result};
use crate::types::QualityReport;
use async_trait::async_trait;

/// Maximum length of a normalized description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 120;

/// Evaluates a submission and returns its score and display description
#[async_trait]
pub trait QualityCheck: Send + Sync {
    /// Score a submission by name and description
    async fn evaluate(&self, name: &str, description: &str) -> Result<QualityReport>;
}

/// Scores submissions from the richness of their description
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicQualityCheck;

#[async_trait]
impl QualityCheck for HeuristicQualityCheck {
    async fn evaluate(&self, name: &str, description: &str) -> Result<QualityReport> {
        if name.is_empty() {
            return Err(Error::QualityCheck(
                "quality check needs an app name".to_string(),
            ));
        }

        let normalized = normalize_description(description);
        let score = score_description(&normalized);
        let normalized_description = if normalized.is_empty() {
            format!("A fresh vibe called {name}")
        } else {
            normalized
        };

        Ok(QualityReport {
            score,
            normalized_description,
        })
    }
}

/// Collapse whitespace and cap the length
pub fn normalize_description(description: &str) -> String {
    let collapsed = description.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((idx, _)) => collapsed[..idx].trim_end().to_string(),
        None => collapsed,
    }
}

/// Baseline 50, plus up to 40 for distinct words, plus 10 for a full sentence
fn score_description(description: &str) -> u8 {
    let mut words: Vec<String> = description
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();
    words.sort_unstable();
    words.dedup();

    let variety = u8::try_from(words.len().min(20)).unwrap_or(20) * 2;
    let sentence = if description.ends_with(['.', '!', '?']) {
        10
    } else {
        0
    };

    (50 + variety + sentence).min(100)
}
