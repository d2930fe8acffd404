//! Simulation host: configuration loading, the command surface and the
//! task that drives ticks on a timer.

pub mod command;
pub mod host;

pub use command::{Command, HostState, HostStatus};
pub use host::{Host, HostError, HostHandle};

use anyhow::{Context, Result};
use biogrid_core::config::AppConfig;
use std::path::Path;

/// Loads `path` if it exists, otherwise the defaults.
///
/// A file that exists but does not parse or validate is an error: a
/// malformed configuration must stop the run before the first tick.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = AppConfig::from_toml(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// The configuration as a TOML document, suitable for `config.toml`.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("serializing config")
}
