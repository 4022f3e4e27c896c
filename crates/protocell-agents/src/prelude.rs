//! Protocell Agents Prelude: convenient imports for common usage.
//!
//! ```rust
//! use protocell_agents::prelude::*;
//! ```

// Re-export entity types
pub use crate::cell::{Cell, CellAction, DivisionPlan};
pub use crate::organism::{
    Organism, MemberStats, ReproductionWave,
    Contender, AbsorptionReason, resolve_absorption,
};
pub use crate::food::FoodPatch;

// Re-export from core
pub use protocell_core::prelude::*;
