//! Read-only views of the world handed to the presentation layer.
//!
//! A snapshot is built after a pass completes and never borrows the
//! world, so a renderer can hold it while the next frame runs.

use protocell_core::error::Result;
use protocell_core::types::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub id: CellId,
    pub position: Vec3,
    pub radius: f64,
    pub kind: CellKind,
    pub mood: Mood,
    pub organism: Option<OrganismId>,
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganismView {
    pub id: OrganismId,
    pub member_count: usize,
    pub hormone: f64,
    pub aggressive: bool,
    pub centroid: Vec3,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodView {
    pub id: FoodId,
    pub position: Vec3,
    pub amount: f64,
}

/// Population counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorldStats {
    pub day: Day,
    pub cells_alive: usize,
    pub organisms_alive: usize,
    pub food_patches: usize,
    pub connections: usize,
    pub total_spawned: u64,
    pub total_divisions: u64,
    pub total_deaths: u64,
    pub total_absorptions: u64,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub day: Day,
    pub paused: bool,
    pub cells: Vec<CellView>,
    pub organisms: Vec<OrganismView>,
    pub food: Vec<FoodView>,
    pub connections: Vec<(CellId, CellId)>,
    pub stats: WorldStats,
}

impl WorldSnapshot {
    pub fn cell(&self, id: CellId) -> Option<&CellView> {
        self.cells.iter().find(|c| c.id == id)
    }

    pub fn organism(&self, id: OrganismId) -> Option<&OrganismView> {
        self.organisms.iter().find(|o| o.id == id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
