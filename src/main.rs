use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use library_export::api::{WebApiClient, DEFAULT_API_URL};
use library_export::config::Params;
use library_export::{auth, pipeline};

/// Request timeout for API calls unless overridden in the parameters file.
const DEFAULT_TIMEOUT_SEC: u64 = 30;

#[derive(Parser, Debug)]
#[command(about = "Export a user's saved-track library to a dated CSV file")]
struct CliArgs {
    /// Path to the TOML file containing run parameters.
    #[clap(long)]
    params: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let params = Params::load(&cli_args.params)?;
    let username = params
        .username
        .clone()
        .context("parameters file is missing required key 'username'")?;

    info!("Requesting access token...");
    let token = auth::request_access_token(&reqwest::Client::new(), &params).await?;

    let api_url = params
        .api_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let timeout_sec = params.timeout_sec.unwrap_or(DEFAULT_TIMEOUT_SEC);
    let api = WebApiClient::new(api_url, token, timeout_sec);

    let summary = pipeline::run_export(&api, &username, Path::new(".")).await?;

    println!(
        "Saved {} songs from {}'s library.",
        summary.row_count, username
    );
    Ok(())
}
