use anyhow::{Context, Result};
use iflow_backend::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` wins over `server.logs.level`. Only a bare level is accepted.
fn resolve_log_level(configured: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());
    level
        .parse::<LevelFilter>()
        .with_context(|| format!("invalid log level '{level}' (expected error, warn, info, debug or trace)"))?;
    Ok(level)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()
        .await
        .context("failed to load configuration")?;

    let log_level = resolve_log_level(&config.server.logs.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .json()
        .init();

    info!(
        documents_dir = %config.server.documents_dir,
        model = %config.llm.model,
        "iFlow backend starting at log level {}",
        log_level
    );

    server::run(config).await?;

    Ok(())
}
