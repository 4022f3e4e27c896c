//! # Protocell Runtime
//!
//! The world, its day tick and the frame driver.
//!
//! The runtime owns every entity pool, rebuilds the octree once per day,
//! runs the aggregation and predation protocol, and publishes read-only
//! snapshots for whatever is drawing the simulation.

pub mod builder;
pub mod clock;
pub mod engine;
pub mod events;
pub mod octree;
pub mod prelude;
pub mod snapshot;
pub mod substrate;
pub mod tissue;
pub mod world;
