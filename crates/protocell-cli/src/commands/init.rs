//! Write a default protocell.toml.

use anyhow::{Context, Result};
use colored::Colorize;
use protocell::prelude::SimConfig;
use std::path::PathBuf;

use crate::config::{save, CONFIG_FILE};

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if config_path.exists() {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
        return Ok(());
    }
    save(&SimConfig::default(), &config_path)?;
    println!("  {} Created {}", "✓".green(), config_path.display());

    println!();
    println!("Next steps:");
    println!("  {} protocell run --days 200", "1.".blue());
    println!("  {} protocell stats --days 200", "2.".blue());
    Ok(())
}
