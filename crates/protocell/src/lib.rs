//! # Protocell
//!
//! A cellular artificial-life engine.
//!
//! Cells drift through a bounded 3D volume, burn energy, feed, divide and
//! stick to their neighbors. Connected cells form organisms, organisms
//! share a hormone that drives reproduction waves and aggression, and
//! organisms that touch merge, the aggressive or larger one absorbing the
//! other.
//!
//! ## Quick Start
//!
//! ```rust
//! use protocell::prelude::*;
//! use std::time::Duration;
//!
//! let mut config = SimConfig::default();
//! config.seed = Some(7);
//! config.world.day_length_secs = 1.0;
//!
//! let mut sim = Simulation::new(config).unwrap();
//! sim.spawn_organism_at(Vec3::new(120.0, 0.0, -80.0), 8);
//!
//! // one frame of 3.5 s runs the continuous pass and three day ticks
//! let report = sim.frame(Duration::from_millis(3500));
//! assert_eq!(report.days_run, 3);
//!
//! for event in &report.events {
//!     println!("{event}");
//! }
//! println!("{} live cells", sim.snapshot().stats.cells_alive);
//! ```
//!
//! ## Architecture
//!
//! - [`protocell_core`] - ids, vectors, config, errors, randomness, the `SpatialIndex` trait
//! - [`protocell_agents`] - `Cell`, `Organism` and `FoodPatch` behavior
//! - [`protocell_runtime`] - the `World`, its day-tick phases, the octree and the frame driver
//!
//! ## The day tick
//!
//! | Phase | What happens |
//! |-------|--------------|
//! | metabolism | aging, energy decay, mood roll, mood action, division |
//! | environment | food regrows or exhausted patches are removed |
//! | neighbors | octree rebuild, connection forming, predation, organism collisions |
//! | organisms | hormone drift, aggression, reproduction waves |
//! | cleanup | dead cells, then memberless organisms, are purged |
//!
//! Motion runs every frame, outside the day tick.

// Re-export all subcrates
pub use protocell_core as core;
pub use protocell_agents as agents;
pub use protocell_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use protocell::prelude::*;
/// ```
pub mod prelude {
    pub use protocell_runtime::prelude::*;
}
