//! World builder.
//!
//! # Example
//!
//! ```rust
//! use protocell_runtime::builder::WorldBuilder;
//! use protocell_core::prelude::*;
//!
//! let world = WorldBuilder::new()
//!     .with_seed(7)
//!     .build()
//!     .unwrap();
//!
//! // one seeded organism, four loose cells, ten food patches
//! assert_eq!(world.organisms().len(), 1);
//! assert_eq!(world.cells().len(), 10);
//! assert_eq!(world.food().len(), 10);
//! ```

use crate::world::World;
use protocell_core::config::SimConfig;
use protocell_core::entropy::{Entropy, SeededEntropy};
use protocell_core::error::Result;

/// Builder for worlds with a chosen config and randomness source.
pub struct WorldBuilder {
    config: SimConfig,
    entropy: Option<Box<dyn Entropy>>,
    populate: bool,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            entropy: None,
            populate: true,
        }
    }

    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the random seed. Overrides any seed in the config.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Use a custom randomness source, e.g. a scripted one in tests.
    pub fn with_entropy(mut self, entropy: Box<dyn Entropy>) -> Self {
        self.entropy = Some(entropy);
        self
    }

    /// Start with empty pools instead of the configured initial population.
    pub fn unpopulated(mut self) -> Self {
        self.populate = false;
        self
    }

    /// Validate the config and build the world.
    pub fn build(self) -> Result<World> {
        self.config.validate()?;
        let entropy = match self.entropy {
            Some(entropy) => entropy,
            None => Box::new(match self.config.seed {
                Some(seed) => SeededEntropy::new(seed),
                None => SeededEntropy::from_os(),
            }),
        };
        Ok(World::from_parts(self.config, entropy, self.populate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocell_core::error::{ConfigError, ProtocellError};

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimConfig::default();
        config.cell.max_energy = -1.0;
        let err = WorldBuilder::new().with_config(config).build().err();
        assert!(matches!(
            err,
            Some(ProtocellError::Config(ConfigError::NotPositive { field: "max_energy", .. }))
        ));
    }

    #[test]
    fn unpopulated_world_is_empty() {
        let world = WorldBuilder::new().with_seed(1).unpopulated().build().unwrap();
        assert!(world.cells().is_empty());
        assert!(world.organisms().is_empty());
        assert!(world.food().is_empty());
        assert_eq!(world.day(), 0);
    }
}
