//! Organism: an aggregate of connected or absorbed cells.
//!
//! An organism owns the membership list, not the cells. Cells stay in the
//! world's pool and point back at their organism by id. Everything spatial
//! (centroid, radius, size) is derived from the live members on demand.

use crate::cell::Cell;
use protocell_core::config::OrganismConfig;
use protocell_core::entropy::{shuffle, Entropy};
use protocell_core::types::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Live-member summary used by the daily update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemberStats {
    pub live: usize,
    pub avg_energy: f64,
}

/// Members picked for a reproduction wave.
#[derive(Debug, Clone, PartialEq)]
pub struct ReproductionWave {
    pub members: Vec<CellId>,
    /// Energy to add to each picked member.
    pub energy_boost: f64,
}

/// A multi-cell organism.
#[derive(Debug, Clone, Serialize)]
pub struct Organism {
    pub id: OrganismId,
    members: BTreeSet<CellId>,
    /// Drives reproduction waves. Always in `[0, 1]`.
    hormone: f64,
    aggressive: bool,
    /// Day the organism was formed.
    pub born: Day,
}

impl Organism {
    pub fn new(id: OrganismId, hormone: f64, born: Day) -> Self {
        Self {
            id,
            members: BTreeSet::new(),
            hormone: hormone.clamp(0.0, 1.0),
            aggressive: false,
            born,
        }
    }

    /// A new organism with a small random starting hormone level.
    pub fn spawn(id: OrganismId, born: Day, config: &OrganismConfig, rng: &mut dyn Entropy) -> Self {
        Self::new(id, rng.range(0.0, config.hormone_initial_max), born)
    }

    pub fn hormone(&self) -> f64 {
        self.hormone
    }

    pub fn set_hormone(&mut self, hormone: f64) {
        self.hormone = hormone.clamp(0.0, 1.0);
    }

    pub fn is_aggressive(&self) -> bool {
        self.aggressive
    }

    pub fn set_aggressive(&mut self, aggressive: bool) {
        self.aggressive = aggressive;
    }

    /// Returns false if the cell was already a member.
    pub fn add_cell(&mut self, id: CellId) -> bool {
        self.members.insert(id)
    }

    pub fn remove_cell(&mut self, id: CellId) -> bool {
        self.members.remove(&id)
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.members.contains(&id)
    }

    /// Every member id, live or not, in id order.
    pub fn members(&self) -> impl Iterator<Item = CellId> + '_ {
        self.members.iter().copied()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Take every member out, leaving the organism empty.
    pub fn drain_members(&mut self) -> BTreeSet<CellId> {
        std::mem::take(&mut self.members)
    }

    pub fn live_members<'a>(
        &'a self,
        cells: &'a BTreeMap<CellId, Cell>,
    ) -> impl Iterator<Item = &'a Cell> + 'a {
        self.members
            .iter()
            .filter_map(move |id| cells.get(id))
            .filter(|c| c.is_alive())
    }

    /// Number of live members.
    pub fn size(&self, cells: &BTreeMap<CellId, Cell>) -> usize {
        self.live_members(cells).count()
    }

    /// True when no member is alive (including when there are no members).
    pub fn is_dead(&self, cells: &BTreeMap<CellId, Cell>) -> bool {
        self.live_members(cells).next().is_none()
    }

    pub fn stats(&self, cells: &BTreeMap<CellId, Cell>) -> MemberStats {
        let (live, total) = self
            .live_members(cells)
            .fold((0usize, 0.0), |(n, sum), c| (n + 1, sum + c.energy()));
        MemberStats {
            live,
            avg_energy: if live > 0 { total / live as f64 } else { 0.0 },
        }
    }

    /// Mean live-member position; `None` for a dead organism.
    pub fn centroid(&self, cells: &BTreeMap<CellId, Cell>) -> Option<Vec3> {
        let (n, sum) = self
            .live_members(cells)
            .fold((0usize, Vec3::ZERO), |(n, sum), c| (n + 1, sum + c.position));
        (n > 0).then(|| sum * (1.0 / n as f64))
    }

    /// Largest live-member distance from the centroid, never below `min_radius`.
    pub fn bounding_radius(&self, cells: &BTreeMap<CellId, Cell>, min_radius: f64) -> f64 {
        let Some(center) = self.centroid(cells) else {
            return min_radius;
        };
        self.live_members(cells)
            .map(|c| c.position.distance_to(&center))
            .fold(min_radius, f64::max)
    }

    /// Hormone drift, aggression and the reproduction wave decision.
    ///
    /// The hormone takes a small random step and is nudged upward while the
    /// organism is small and while its members are well fed. Aggression is
    /// recomputed from scratch every day. A wave picks roughly a third of
    /// the live members and discounts the hormone sharply.
    pub fn daily_update(
        &mut self,
        cells: &BTreeMap<CellId, Cell>,
        config: &OrganismConfig,
        max_energy: f64,
        rng: &mut dyn Entropy,
    ) -> Option<ReproductionWave> {
        let MemberStats { live, avg_energy } = self.stats(cells);

        let mut hormone = self.hormone;
        hormone += rng.centered(config.hormone_walk);
        hormone += (1.0 - (live as f64 / config.small_size_scale).tanh()) * config.small_bias;
        hormone += (avg_energy / max_energy - 0.5) * config.energy_bias;
        self.hormone = hormone.clamp(0.0, 1.0);

        self.aggressive = avg_energy < config.aggression_energy_ceiling
            && live > config.aggression_size_floor
            && rng.chance(config.aggression_probability);

        if !(self.hormone > config.wave_hormone_threshold
            && live >= config.wave_size_floor
            && rng.chance(config.wave_probability))
        {
            return None;
        }

        let mut picked: Vec<CellId> = self.live_members(cells).map(|c| c.id).collect();
        shuffle(&mut picked, rng);
        picked.truncate((live / config.wave_member_divisor).max(1));
        self.hormone *= config.wave_hormone_discount;

        Some(ReproductionWave {
            members: picked,
            energy_boost: config.wave_energy_boost,
        })
    }
}

/// One side of an absorption decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contender {
    pub id: OrganismId,
    /// Live member count.
    pub size: usize,
    pub aggressive: bool,
}

impl Contender {
    pub fn of(organism: &Organism, cells: &BTreeMap<CellId, Cell>) -> Self {
        Self {
            id: organism.id,
            size: organism.size(cells),
            aggressive: organism.is_aggressive(),
        }
    }
}

/// Which precedence rule settled an absorption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsorptionReason {
    /// Aggressive organism against a non-aggressive one.
    Aggression,
    /// At least the configured size ratio larger.
    Dominance,
    /// Strictly larger.
    Size,
    /// Equal size; lower id wins.
    Tiebreak,
    /// A caller forced the direction against the precedence rules.
    Directed,
}

/// Decide who absorbs whom. Returns `(absorber, absorbed, reason)`, or
/// `None` for a self-merge.
pub fn resolve_absorption(
    a: Contender,
    b: Contender,
    size_ratio: f64,
) -> Option<(OrganismId, OrganismId, AbsorptionReason)> {
    if a.id == b.id {
        return None;
    }
    let (winner, loser, reason) = if a.aggressive != b.aggressive {
        if a.aggressive {
            (a, b, AbsorptionReason::Aggression)
        } else {
            (b, a, AbsorptionReason::Aggression)
        }
    } else if a.size as f64 >= b.size as f64 * size_ratio && a.size > b.size {
        (a, b, AbsorptionReason::Dominance)
    } else if b.size as f64 >= a.size as f64 * size_ratio && b.size > a.size {
        (b, a, AbsorptionReason::Dominance)
    } else if a.size != b.size {
        if a.size > b.size {
            (a, b, AbsorptionReason::Size)
        } else {
            (b, a, AbsorptionReason::Size)
        }
    } else if a.id < b.id {
        (a, b, AbsorptionReason::Tiebreak)
    } else {
        (b, a, AbsorptionReason::Tiebreak)
    };
    Some((winner.id, loser.id, reason))
}
