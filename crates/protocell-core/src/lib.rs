//! # Protocell Core
//!
//! Core types and traits shared by every protocell crate.
//!
//! The engine simulates a population of cells inside a bounded 3D volume.
//! Cells metabolise, change mood, divide, connect into organisms and prey on
//! each other. This crate holds the vocabulary the rest of the workspace
//! speaks:
//!
//! - **Identities**: `CellId`, `OrganismId`, `FoodId` (arena keys, never pointers)
//! - **Geometry**: `Vec3` and the axis-aligned `Bounds` of the world
//! - **Behavior tags**: `Mood`, `CellKind`, `DeathCause`
//! - **Configuration**: `SimConfig` with validated, serde-friendly sections
//! - **Randomness**: the `Entropy` trait every stochastic decision goes through
//! - **Spatial indexing**: the `SpatialIndex` trait for neighbor queries
//!
//! ## Quick Start
//!
//! ```rust
//! use protocell_core::prelude::*;
//!
//! let config = SimConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let mut entropy = SeededEntropy::new(42);
//! let draw = entropy.next_f64();
//! assert!((0.0..1.0).contains(&draw));
//! ```

pub mod types;
pub mod constants;
pub mod config;
pub mod error;
pub mod entropy;
pub mod spatial;
pub mod prelude;
