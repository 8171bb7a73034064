//! Log output for the CLI

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the tracing subscriber
///
/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// overrides the level picked from `verbose`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "vibe_funnel=debug,vibe=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()?;
    Ok(())
}
