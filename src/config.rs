//! Deployment endpoints and timing
//!
//! Defaults are compiled in and can be overridden through `VIBE_*`
//! environment variables and then by command-line flags.

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Placeholder replaced by the sanitized app name in URL templates
pub const APP_PLACEHOLDER: &str = "{app}";

/// Largest artifact accepted for upload (1 MB)
pub const MAX_ARTIFACT_BYTES: usize = 1024 * 1024;

/// Content type sent with the artifact transfer
pub const ARTIFACT_CONTENT_TYPE: &str = "application/zip";

/// Default endpoint issuing presigned upload targets
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://api.agenticus.eu/upload-url";

/// Default public URL of a deployed app
pub const DEFAULT_DEPLOY_URL_TEMPLATE: &str = "https://{app}.agenticus.eu";

/// Default URL probed for readiness
pub const DEFAULT_PROBE_URL_TEMPLATE: &str = "https://{app}.agenticus.eu/index.html";

/// Default readiness deadline
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(180);

/// Default pause between readiness probes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default bound on the quality check
pub const DEFAULT_QUALITY_TIMEOUT: Duration = Duration::from_secs(15);

/// Default per-request HTTP timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Readiness polling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Give up after this much wall-clock time
    pub timeout: Duration,
    /// Pause between probes
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_POLL_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Effective deployment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Endpoint returning `{ "url", "key" }` for an `appName`
    pub upload_endpoint: String,
    /// Template for the public deployment URL
    pub deploy_url_template: String,
    /// Template for the readiness probe URL
    pub probe_url_template: String,
    /// Readiness polling parameters
    pub poll: PollOptions,
    /// Bound on the quality check
    pub quality_timeout: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Treat probe status codes as invisible (cross-origin style probing)
    pub opaque_probes: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            deploy_url_template: DEFAULT_DEPLOY_URL_TEMPLATE.to_string(),
            probe_url_template: DEFAULT_PROBE_URL_TEMPLATE.to_string(),
            poll: PollOptions::default(),
            quality_timeout: DEFAULT_QUALITY_TIMEOUT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            opaque_probes: false,
        }
    }
}

impl DeployConfig {
    /// Load defaults overridden by environment variables
    ///
    /// Recognized variables:
    /// - `VIBE_UPLOAD_ENDPOINT`
    /// - `VIBE_DEPLOY_URL_TEMPLATE`
    /// - `VIBE_PROBE_URL_TEMPLATE`
    /// - `VIBE_POLL_TIMEOUT_SECS`
    /// - `VIBE_POLL_INTERVAL_SECS`
    /// - `VIBE_QUALITY_TIMEOUT_SECS`
    /// - `VIBE_OPAQUE_PROBES` (`1`/`true`/`yes`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty_var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let secs_var = |name: &str| parse_secs(name, non_empty_var(name));
        let mut config = Self::default();

        if let Some(v) = non_empty_var("VIBE_UPLOAD_ENDPOINT") {
            config.upload_endpoint = v;
        }
        if let Some(v) = non_empty_var("VIBE_DEPLOY_URL_TEMPLATE") {
            config.deploy_url_template = v;
        }
        if let Some(v) = non_empty_var("VIBE_PROBE_URL_TEMPLATE") {
            config.probe_url_template = v;
        }
        if let Some(secs) = secs_var("VIBE_POLL_TIMEOUT_SECS")? {
            config.poll.timeout = secs;
        }
        if let Some(secs) = secs_var("VIBE_POLL_INTERVAL_SECS")? {
            config.poll.interval = secs;
        }
        if let Some(secs) = secs_var("VIBE_QUALITY_TIMEOUT_SECS")? {
            config.quality_timeout = secs;
        }
        if let Some(v) = non_empty_var("VIBE_OPAQUE_PROBES") {
            config.opaque_probes = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    /// Check templates and timings are usable
    pub fn validate(&self) -> Result<()> {
        check_url("upload endpoint", &self.upload_endpoint)?;

        for (what, template) in [
            ("deploy URL template", &self.deploy_url_template),
            ("probe URL template", &self.probe_url_template),
        ] {
            if !template.contains(APP_PLACEHOLDER) {
                return Err(Error::Config(format!(
                    "{what} must contain {APP_PLACEHOLDER}: {template}"
                )));
            }
            check_url(what, &render_template(template, "probe"))?;
        }

        if self.poll.interval.is_zero() {
            return Err(Error::Config("poll interval must be greater than zero".into()));
        }
        if self.poll.timeout.is_zero() {
            return Err(Error::Config("poll timeout must be greater than zero".into()));
        }

        Ok(())
    }

    /// Public URL the app will be served from
    pub fn deployment_url(&self, app_name: &str) -> String {
        render_template(&self.deploy_url_template, app_name)
    }

    /// URL probed to decide whether the deployment is live
    pub fn probe_url(&self, app_name: &str) -> String {
        render_template(&self.probe_url_template, app_name)
    }
}

/// Substitute the app name into a URL template
pub fn render_template(template: &str, app_name: &str) -> String {
    template.replace(APP_PLACEHOLDER, app_name)
}

fn check_url(what: &str, value: &str) -> Result<()> {
    let parsed =
        url::Url::parse(value).map_err(|e| Error::Config(format!("invalid {what} '{value}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "{what} must use http or https, got {other}"
        ))),
    }
}

fn parse_secs(name: &str, value: Option<String>) -> Result<Option<Duration>> {
    value
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| Error::Config(format!("{name} must be a whole number of seconds, got '{v}'")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = DeployConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll.timeout, Duration::from_secs(180));
        assert_eq!(config.poll.interval, Duration::from_secs(3));
    }

    #[test]
    fn test_urls_are_derived_from_templates() {
        let config = DeployConfig::default();
        assert_eq!(config.deployment_url("homo"), "https://homo.agenticus.eu");
        assert_eq!(
            config.probe_url("homo"),
            "https://homo.agenticus.eu/index.html"
        );
        assert_ne!(config.deployment_url("homo"), config.probe_url("homo"));
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let config = DeployConfig {
            deploy_url_template: "https://static.example".to_string(),
            ..DeployConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_non_http_endpoint_rejected() {
        let config = DeployConfig {
            upload_endpoint: "ftp://api.example/upload".to_string(),
            ..DeployConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let config = DeployConfig::from_lookup(lookup_from(&[
            ("VIBE_UPLOAD_ENDPOINT", "http://localhost:8080/upload-url"),
            ("VIBE_DEPLOY_URL_TEMPLATE", "http://localhost:8081/{app}/"),
            ("VIBE_POLL_TIMEOUT_SECS", "60"),
            ("VIBE_POLL_INTERVAL_SECS", " 1 "),
            ("VIBE_OPAQUE_PROBES", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.upload_endpoint, "http://localhost:8080/upload-url");
        assert_eq!(config.deployment_url("demo"), "http://localhost:8081/demo/");
        assert_eq!(config.probe_url_template, DEFAULT_PROBE_URL_TEMPLATE);
        assert_eq!(config.poll.timeout, Duration::from_secs(60));
        assert_eq!(config.poll.interval, Duration::from_secs(1));
        assert!(config.opaque_probes);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config =
            DeployConfig::from_lookup(lookup_from(&[("VIBE_UPLOAD_ENDPOINT", "  ")])).unwrap();
        assert_eq!(config.upload_endpoint, DEFAULT_UPLOAD_ENDPOINT);
    }

    #[test]
    fn test_bad_seconds_rejected() {
        let err = DeployConfig::from_lookup(lookup_from(&[("VIBE_POLL_TIMEOUT_SECS", "3m")]))
            .unwrap_err();
        assert!(err.to_string().contains("VIBE_POLL_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_interval_from_env_rejected() {
        let result = DeployConfig::from_lookup(lookup_from(&[("VIBE_POLL_INTERVAL_SECS", "0")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = DeployConfig {
            poll: PollOptions {
                timeout: Duration::from_secs(10),
                interval: Duration::ZERO,
            },
            ..DeployConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
