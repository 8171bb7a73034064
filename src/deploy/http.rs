//! HTTP deployment service implementation

use crate::config::DeployConfig;
use crate::deploy::{DeployService, ProbeResponse, ReadinessProbe};
use crate::error::{Error, Result};
use crate::types::UploadTarget;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

/// Maximum characters of an error response body kept for diagnostics
pub const BODY_EXCERPT_LIMIT: usize = 200;

/// Deployment service using reqwest
pub struct HttpDeployService {
    client: Client,
    upload_endpoint: Url,
    opaque_probes: bool,
}

impl HttpDeployService {
    /// Create a new HTTP deployment service
    pub fn new(config: &DeployConfig) -> Result<Self> {
        let upload_endpoint = Url::parse(&config.upload_endpoint).map_err(|e| {
            Error::Config(format!(
                "invalid upload endpoint '{}': {e}",
                config.upload_endpoint
            ))
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            upload_endpoint,
            opaque_probes: config.opaque_probes,
        })
    }

    fn upload_target_url(&self, app_name: &str) -> Url {
        let mut url = self.upload_endpoint.clone();
        url.query_pairs_mut().append_pair("appName", app_name);
        url
    }
}

#[async_trait]
impl DeployService for HttpDeployService {
    async fn request_upload_target(&self, app_name: &str) -> Result<UploadTarget> {
        let url = self.upload_target_url(app_name);
        debug!(event = "upload_target.request", %url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(event = "upload_target.rejected", status = status.as_u16());
            return Err(Error::UploadTarget {
                status: status.as_u16(),
            });
        }

        let target: UploadTarget = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("invalid upload target response: {e}")))?;

        info!(event = "upload_target.issued", key = %target.object_key);
        Ok(target)
    }

    async fn upload_artifact(
        &self,
        target: &UploadTarget,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<()> {
        let response = self
            .client
            .put(&target.upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(event = "artifact.uploaded", key = %target.object_key, size_bytes = bytes.len());
            return Ok(());
        }

        // Body read failures leave the excerpt empty
        let body = response.text().await.unwrap_or_default();
        warn!(event = "artifact.rejected", status = status.as_u16());
        Err(Error::Upload {
            status: status.as_u16(),
            body_excerpt: excerpt(&body, BODY_EXCERPT_LIMIT),
        })
    }
}

#[async_trait]
impl ReadinessProbe for HttpDeployService {
    async fn probe(&self, url: &str) -> Result<ProbeResponse> {
        let response = self.client.get(url).send().await?;
        if self.opaque_probes {
            return Ok(ProbeResponse::opaque());
        }
        Ok(ProbeResponse::with_status(response.status().as_u16()))
    }
}

/// Trim and cut `text` to at most `limit` characters
fn excerpt(text: &str, limit: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
