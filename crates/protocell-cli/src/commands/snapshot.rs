//! Dump the world snapshot as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use protocell::prelude::*;
use std::path::PathBuf;

pub fn run(config: SimConfig, days: u64, output: Option<PathBuf>) -> Result<()> {
    let mut sim = Simulation::new(config)?;
    sim.run_days(days);
    let json = sim.snapshot().to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
