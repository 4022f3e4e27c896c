//! Print the effective configuration.

use anyhow::Result;
use protocell::prelude::SimConfig;

pub fn run(config: SimConfig) -> Result<()> {
    print!("{}", crate::config::to_toml(&config)?);
    Ok(())
}
