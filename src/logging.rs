use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "TXFEED_LOG";

const DEFAULT_FILTER: &str = "info";

pub fn log_path() -> Result<PathBuf> {
    Ok(Config::config_dir()?.join("txfeed.log"))
}

/// Route `tracing` output to the log file; stdout belongs to the terminal UI
pub fn init_tracing() -> Result<PathBuf> {
    let path = log_path()?;
    init_tracing_at(&path)?;
    Ok(path)
}

pub fn init_tracing_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {dir:?}"))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {path:?}"))?;

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")
}
