//! File logging.
//!
//! The terminal belongs to the TUI, so log output goes to a file in the
//! platform data directory. `WAVEFIELD_LOG` takes an `EnvFilter` directive
//! and defaults to `info`.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use color_eyre::eyre::{WrapErr, eyre};
use tracing_subscriber::EnvFilter;
use wavefield_config::Config;

const FILTER_ENV: &str = "WAVEFIELD_LOG";

/// Install the global subscriber. Returns the log file path.
pub fn init() -> color_eyre::Result<PathBuf> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;
    Ok(path)
}
