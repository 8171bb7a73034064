//! Local input checks run before any network call

use crate::config::MAX_ARTIFACT_BYTES;
use crate::error::{Error, Result};
use crate::types::Artifact;
use regex::Regex;
use std::sync::OnceLock;

fn app_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9]+$").expect("hardcoded app name pattern is valid"))
}

/// Reduce user input to the lowercase alphanumeric form used in URLs
pub fn sanitize_app_name(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Check an app name is non-empty lowercase alphanumeric
pub fn validate_app_name(name: &str) -> Result<()> {
    if app_name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidAppName(name.to_string()))
    }
}

/// Check an artifact is attached and within the upload cap
pub fn validate_artifact(artifact: Option<&Artifact>) -> Result<&Artifact> {
    let artifact = artifact.ok_or(Error::MissingArtifact)?;
    if artifact.len() > MAX_ARTIFACT_BYTES {
        return Err(Error::ArtifactTooLarge {
            size: artifact.len(),
            limit: MAX_ARTIFACT_BYTES,
        });
    }
    Ok(artifact)
}
