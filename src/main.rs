//! vibe - submit vibe-coded apps for deployment
//!
//! CLI binary for uploading an app artifact and waiting for it to go live.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser)]
#[command(name = "vibe")]
#[command(about = "Submit vibe-coded apps and watch them go live")]
#[command(version)]
struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an app: upload its artifact and wait for the deployment
    Submit {
        /// App name (reduced to lowercase letters and digits)
        name: String,

        /// Zip archive with the app
        #[arg(short, long)]
        artifact: Option<PathBuf>,

        /// Author shown in the listing
        #[arg(long)]
        author: Option<String>,

        /// Short description of the app
        #[arg(short, long)]
        description: Option<String>,

        #[command(flatten)]
        endpoints: EndpointArgs,
    },

    /// Check whether an uploaded app is reachable yet
    Check {
        /// App name
        name: String,

        #[command(flatten)]
        endpoints: EndpointArgs,
    },

    /// List the showcase apps by stage
    List,
}

/// Overrides for `VIBE_*` environment configuration
#[derive(Args, Clone, Default)]
pub struct EndpointArgs {
    /// Endpoint issuing upload targets
    #[arg(long, value_name = "URL")]
    upload_endpoint: Option<String>,

    /// Give up waiting for the deployment after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Seconds between readiness probes
    #[arg(long, value_name = "SECS")]
    interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose)?;

    let ok = match cli.command {
        Commands::Submit {
            name,
            artifact,
            author,
            description,
            endpoints,
        } => {
            let config = cli::load_config(&endpoints)?;
            cli::run_submit(
                config,
                &name,
                artifact.as_deref(),
                author.as_deref(),
                description.as_deref(),
            )
            .await?
        }
        Commands::Check { name, endpoints } => {
            let config = cli::load_config(&endpoints)?;
            cli::run_check(&config, &name).await?
        }
        Commands::List => {
            cli::run_list();
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
