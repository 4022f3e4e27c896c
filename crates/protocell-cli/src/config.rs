//! Configuration loading for the Protocell CLI.

use anyhow::{Context, Result};
use protocell::prelude::SimConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "protocell.toml";

/// Load the simulation config from `path`, or from protocell.toml in the
/// current or a parent directory, or fall back to the defaults. `seed`
/// overrides whatever the file says.
pub fn load(path: Option<&Path>, seed: Option<u64>) -> Result<SimConfig> {
    let found = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(),
    };
    let mut config = match found {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            read(&path)?
        }
        None => {
            debug!("no {CONFIG_FILE} found, using defaults");
            SimConfig::default()
        }
    };
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Parse a config file without validating it.
pub fn read(path: &Path) -> Result<SimConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Save a config to the specified path.
pub fn save(config: &SimConfig, path: &Path) -> Result<()> {
    std::fs::write(path, to_toml(config)?)
        .with_context(|| format!("Failed to write config: {}", path.display()))
}

pub fn to_toml(config: &SimConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

/// Find protocell.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
