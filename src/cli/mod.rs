//! CLI commands
//!
//! Command implementations for the `vibe` binary.

mod check;
mod list;
mod logging;
mod progress;
mod style;
mod submit;

pub use check::run_check;
pub use list::run_list;
pub use logging::init_logging;
pub use submit::run_submit;

use crate::EndpointArgs;
use std::time::Duration;
use vibe_funnel::config::DeployConfig;
use vibe_funnel::error::Result;

/// Environment configuration with command-line overrides applied
pub fn load_config(args: &EndpointArgs) -> Result<DeployConfig> {
    let mut config = DeployConfig::from_env()?;

    if let Some(endpoint) = &args.upload_endpoint {
        config.upload_endpoint.clone_from(endpoint);
    }
    if let Some(secs) = args.timeout_secs {
        config.poll.timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = args.interval_secs {
        config.poll.interval = Duration::from_secs(secs);
    }

    config.validate()?;
    Ok(config)
}
