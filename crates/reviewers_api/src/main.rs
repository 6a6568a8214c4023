//! Reviewer registry server entry point.

use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;
use reviewers_api::{create_router, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    config.validate()?;

    reviewers_core::init_logging(config.effective_log_level(), config.log_dir.as_deref())
        .map_err(|err| anyhow!(err))?;

    let state = AppState::open(&config.database_target())
        .with_context(|| format!("failed to open database {:?}", config.database_target()))?;
    let existing = state
        .reviewer_count()
        .await
        .context("failed to count reviewers on startup")?;
    let log_target = reviewers_core::logging_status()
        .and_then(|(_, dir)| dir)
        .map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=api status=ok bind={} reviewers={} log_target={} version={}",
        config.bind,
        existing,
        log_target,
        reviewers_core::core_version()
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=server_signal module=api status=error error={err}");
    }
}
