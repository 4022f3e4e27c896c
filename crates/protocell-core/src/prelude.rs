//! Protocell Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use protocell_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    CellId, OrganismId, FoodId, Day,
    Vec3, Bounds,
    Mood, CellKind, DeathCause,
};

// Re-export configuration
pub use crate::config::{
    SimConfig, FoodMode,
    WorldConfig, CellConfig, MoodConfig, DivisionConfig,
    OrganismConfig, AggregationConfig, FoodConfig,
    SubstrateConfig, SeedingConfig,
};

// Re-export the randomness source
pub use crate::entropy::{Entropy, SeededEntropy, ScriptedEntropy, shuffle};

// Re-export the SpatialIndex trait
pub use crate::spatial::SpatialIndex;

// Re-export error types
pub use crate::error::{ProtocellError, ConfigError, Result};
