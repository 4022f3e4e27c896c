//! # Protocell Agents
//!
//! Entity behavior for the protocell engine.
//!
//! Each entity type owns its own state and the rules that act on it; the
//! runtime's `World` owns the pools and resolves anything that needs to
//! look at more than one entity:
//!
//! - **Cell**: aging, the daily mood table, mood actions, division plans, motion
//! - **Organism**: member bookkeeping, centroid and radius, hormone drift,
//!   aggression and reproduction waves, absorption precedence
//! - **FoodPatch**: depletable, optionally regenerating energy source

pub mod cell;
pub mod organism;
pub mod food;
pub mod prelude;
