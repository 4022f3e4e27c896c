//! Protocell Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use protocell_runtime::prelude::*;
//! ```

// Re-export the world and its builder
pub use crate::world::World;
pub use crate::builder::WorldBuilder;

// Re-export the frame driver
pub use crate::engine::{Simulation, FrameReport};
pub use crate::clock::SimClock;

// Re-export events and snapshots
pub use crate::events::{SimEvent, DayEvent, EventLog, FormationOrigin};
pub use crate::snapshot::{WorldSnapshot, WorldStats, CellView, OrganismView, FoodView};

// Re-export spatial structures
pub use crate::octree::Octree;
pub use crate::tissue::Tissue;
pub use crate::substrate::AdhesionField;

// Re-export from agents
pub use protocell_agents::prelude::*;
