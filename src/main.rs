//! Worksheet engine server - main entry point
//!
//! Loads a support schedule and serves the calculation API over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use support_engine::api::{AppState, create_router};
use support_engine::config::ConfigLoader;

/// Command-line arguments for the worksheet engine server
#[derive(Parser, Debug)]
#[command(name = "support-engine")]
#[command(about = "Child support worksheet engine")]
#[command(version)]
struct Args {
    /// Path to the schedule YAML file
    #[arg(short, long, default_value = "./config/schedule.yaml", env = "SUPPORT_SCHEDULE")]
    schedule: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000", env = "SUPPORT_BIND")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "support_engine=info".into()),
        )
        .init();

    let args = Args::parse();

    let loader = ConfigLoader::load(&args.schedule)
        .with_context(|| format!("Failed to load schedule from {}", args.schedule.display()))?;
    info!(
        schedule = %loader.metadata().name,
        effective_date = %loader.metadata().effective_date,
        rows = loader.table().incomes.len(),
        "Schedule loaded"
    );

    let app = create_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("Listening on http://{}", args.bind);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
