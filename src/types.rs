//! Core types for vibe-funnel

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Author recorded when the submitter leaves the field blank
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Display stage of an app in the funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStage {
    /// Freshly submitted, collecting likes
    Vibe,
    /// Picked up by contributors
    Building,
    /// Live with real users
    Scaling,
}

impl AppStage {
    /// All stages in funnel order
    pub const ALL: [Self; 3] = [Self::Vibe, Self::Building, Self::Scaling];
}

impl fmt::Display for AppStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vibe => write!(f, "Vibe"),
            Self::Building => write!(f, "Building"),
            Self::Scaling => write!(f, "Scaling"),
        }
    }
}

/// A listed application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    /// Unique identifier
    pub id: String,
    /// Sanitized app name
    pub name: String,
    /// Public URL of the app
    pub link: String,
    /// Who submitted it
    pub author: String,
    /// Like counter (Vibe stage metric)
    pub likes: u32,
    /// Contributor counter (Building stage metric)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors: Option<u32>,
    /// User counter (Scaling stage metric)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u32>,
    /// Quality score, 0..=100
    pub vibe_score: u8,
    /// Short description
    pub description: String,
    /// When the entry was created
    pub timestamp: DateTime<Utc>,
    /// Current funnel stage
    pub stage: AppStage,
}

/// Packaged application bundle
#[derive(Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Original file name, for display
    pub file_name: String,
    /// Raw archive bytes
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Wrap in-memory bytes
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read an artifact from disk
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { file_name, bytes })
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the artifact has no content
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Bytes are elided so debug logs stay readable
impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything a user hands over when submitting an app
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    /// App name; normalized to `[a-z0-9]+` by [`SubmissionRequest::new`]
    pub app_name: String,
    /// Author name
    pub author: String,
    /// Free-form description
    pub description: String,
    /// Artifact to deploy
    pub artifact: Option<Artifact>,
}

impl SubmissionRequest {
    /// Create a request, normalizing the raw app name as typed by the user
    pub fn new(raw_app_name: &str) -> Self {
        Self {
            app_name: crate::submit::sanitize_app_name(raw_app_name),
            author: ANONYMOUS_AUTHOR.to_string(),
            description: String::new(),
            artifact: None,
        }
    }

    /// Set the author; blank input keeps the anonymous default
    #[must_use]
    pub fn with_author(mut self, author: Option<&str>) -> Self {
        self.author = match author.map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => ANONYMOUS_AUTHOR.to_string(),
        };
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.unwrap_or_default().to_string();
        self
    }

    /// Attach the artifact
    #[must_use]
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifact = Some(artifact);
        self
    }
}

/// One-time destination for a direct artifact transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadTarget {
    /// Presigned URL to PUT the artifact to
    #[serde(rename = "url")]
    pub upload_url: String,
    /// Storage key the artifact will land under
    #[serde(rename = "key")]
    pub object_key: String,
}

/// Output of the quality check collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityReport {
    /// Score, 0..=100
    pub score: u8,
    /// Description cleaned up for display
    pub normalized_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_normalizes_name() {
        let req = SubmissionRequest::new("My Awesome App!");
        assert_eq!(req.app_name, "myawesomeapp");
        assert_eq!(req.author, ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_blank_author_falls_back_to_anonymous() {
        let req = SubmissionRequest::new("app").with_author(Some("   "));
        assert_eq!(req.author, ANONYMOUS_AUTHOR);

        let req = SubmissionRequest::new("app").with_author(Some(" Chronos_Surfer "));
        assert_eq!(req.author, "Chronos_Surfer");
    }

    #[test]
    fn test_upload_target_wire_format() {
        let target: UploadTarget =
            serde_json::from_str(r#"{"url":"https://bucket.example/put?sig=1","key":"apps/demo.zip"}"#)
                .unwrap();
        assert_eq!(target.upload_url, "https://bucket.example/put?sig=1");
        assert_eq!(target.object_key, "apps/demo.zip");
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = AppEntry {
            id: "1".to_string(),
            name: "demo".to_string(),
            link: "https://demo.example".to_string(),
            author: ANONYMOUS_AUTHOR.to_string(),
            likes: 3,
            contributors: None,
            user_count: Some(10),
            vibe_score: 90,
            description: "Demo".to_string(),
            timestamp: Utc::now(),
            stage: AppStage::Scaling,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["vibeScore"], 90);
        assert_eq!(json["userCount"], 10);
        assert_eq!(json["stage"], "scaling");
        assert!(json.get("contributors").is_none());
    }

    #[test]
    fn test_artifact_debug_hides_bytes() {
        let artifact = Artifact::new("app.zip", vec![0; 4]);
        let debug = format!("{artifact:?}");
        assert!(debug.contains("len: 4"));
        assert!(!debug.contains("[0, 0"));
    }
}
