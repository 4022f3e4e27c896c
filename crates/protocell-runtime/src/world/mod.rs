//! The world: entity pools, the connection graph and the day tick.
//!
//! Cells, organisms and food patches live in id-keyed maps. Nothing holds
//! a reference to anything else; a cell names its organism by id, an
//! organism lists its members by id, and connections are id pairs in the
//! [`Tissue`]. Every mutation that has to keep two sides in agreement
//! (membership, absorption, death) goes through a method on `World`.
//!
//! A day tick runs these phases in order:
//!
//! 1. metabolism: aging, decay, mood, mood action, division
//! 2. environment: food regeneration or depletion
//! 3. neighbors: index rebuild, connection forming, predation, organism collisions
//! 4. organisms: hormone drift, aggression, reproduction waves
//! 5. cleanup: purge dead cells, then organisms without live members
//!
//! Motion is not part of the day tick; see [`World::advance_motion`].

mod phases;


use crate::events::{DayEvent, EventLog, FormationOrigin, SimEvent};
use crate::octree::Octree;
use crate::snapshot::{CellView, FoodView, OrganismView, WorldSnapshot, WorldStats};
use crate::substrate::AdhesionField;
use crate::tissue::Tissue;
use protocell_agents::cell::Cell;
use protocell_agents::food::FoodPatch;
use protocell_agents::organism::{resolve_absorption, AbsorptionReason, Contender, Organism};
use protocell_core::config::SimConfig;
use protocell_core::entropy::Entropy;
use protocell_core::spatial::SpatialIndex;
use protocell_core::types::*;
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use tracing::{debug, info, trace};

/// Running totals since the last reset.
#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    spawned: u64,
    divisions: u64,
    deaths: u64,
    absorptions: u64,
}

pub struct World {
    config: SimConfig,
    rng: Box<dyn Entropy>,
    day: Day,
    cells: BTreeMap<CellId, Cell>,
    organisms: BTreeMap<OrganismId, Organism>,
    food: BTreeMap<FoodId, FoodPatch>,
    tissue: Tissue,
    index: Octree,
    substrate: AdhesionField,
    events: EventLog,
    counters: Counters,
    next_cell: u64,
    next_organism: u64,
    next_food: u64,
}

impl World {
    /// Assemble a world from a validated config. Use
    /// [`WorldBuilder`](crate::builder::WorldBuilder) from outside the crate.
    pub(crate) fn from_parts(config: SimConfig, mut rng: Box<dyn Entropy>, populate: bool) -> Self {
        let substrate = AdhesionField::generate(config.world.bounds, &config.substrate, rng.as_mut());
        let mut world = Self {
            index: Octree::from_config(&config.world),
            config,
            rng,
            day: 0,
            cells: BTreeMap::new(),
            organisms: BTreeMap::new(),
            food: BTreeMap::new(),
            tissue: Tissue::new(),
            substrate,
            events: EventLog::new(),
            counters: Counters::default(),
            next_cell: 1,
            next_organism: 1,
            next_food: 1,
        };
        if populate {
            world.populate();
        }
        world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Days simulated since creation or the last reset.
    pub fn day(&self) -> Day {
        self.day
    }

    pub fn cells(&self) -> &BTreeMap<CellId, Cell> {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(&id)
    }

    pub fn organisms(&self) -> &BTreeMap<OrganismId, Organism> {
        &self.organisms
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub fn organism_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.organisms.get_mut(&id)
    }

    pub fn food(&self) -> &BTreeMap<FoodId, FoodPatch> {
        &self.food
    }

    pub fn tissue(&self) -> &Tissue {
        &self.tissue
    }

    /// The index as built by the most recent day tick.
    pub fn index(&self) -> &Octree {
        &self.index
    }

    pub fn substrate(&self) -> &AdhesionField {
        &self.substrate
    }

    pub fn live_cell_count(&self) -> usize {
        self.cells.values().filter(|c| c.is_alive()).count()
    }

    /// Take the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<DayEvent> {
        self.events.drain()
    }

    /// Run one full day tick.
    pub fn step_day(&mut self) {
        self.day += 1;

        let births = self.metabolism_phase();
        self.insert_children(births);
        self.environment_phase();

        self.rebuild_index();
        self.adhesion_phase();
        self.predation_phase();
        self.resolve_collisions();

        self.organism_phase();
        self.cleanup_phase();

        debug!(
            day = self.day,
            cells = self.cells.len(),
            organisms = self.organisms.len(),
            connections = self.tissue.connection_count(),
            "day complete"
        );
    }

    /// Continuous pass: move every live cell by `seconds` of real time.
    pub fn advance_motion(&mut self, seconds: f64) {
        if seconds <= 0.0 {
            return;
        }
        for cell in self.cells.values_mut() {
            cell.integrate(seconds, &self.config.world);
        }
    }

    // ---- Commands ------------------------------------------------------

    /// Spawn an organism of `count` fresh stem cells around `center`.
    /// Returns `None` when `count` is zero.
    pub fn spawn_organism_at(&mut self, center: Vec3, count: usize) -> Option<OrganismId> {
        if count == 0 {
            trace!("spawn request with zero cells ignored");
            return None;
        }
        let organism = self.new_organism();
        for _ in 0..count {
            let position = self.scatter_around(center);
            self.spawn_cell(position, Some(organism));
        }
        self.record(SimEvent::OrganismFormed {
            organism,
            origin: FormationOrigin::Seeded,
            members: count,
        });
        info!(%organism, cells = count, "organism spawned");
        Some(organism)
    }

    /// Spawn an organism of random size at a random position.
    pub fn spawn_random_organism(&mut self) -> Option<OrganismId> {
        let s = &self.config.seeding;
        let span = s.random_organism_max_cells - s.random_organism_min_cells + 1;
        let count = s.random_organism_min_cells + self.rng.below(span);
        let center = self.random_point(0.6);
        self.spawn_organism_at(center, count)
    }

    /// Tear everything down and reseed from the config. The random stream
    /// carries on, so a reset world differs from the first one.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.organisms.clear();
        self.food.clear();
        self.tissue.clear();
        self.index.clear();
        self.events.clear();
        self.counters = Counters::default();
        self.day = 0;
        self.next_cell = 1;
        self.next_organism = 1;
        self.next_food = 1;
        self.substrate = AdhesionField::generate(
            self.config.world.bounds,
            &self.config.substrate,
            self.rng.as_mut(),
        );
        self.record(SimEvent::SimulationReset);
        self.populate();
        info!("simulation reset");
    }

    /// Move every member of `absorbed` into `absorber` and drop `absorbed`.
    /// Returns the number of members moved, or `None` for a self-merge or
    /// when either organism is gone.
    ///
    /// The recorded reason is the precedence rule when it agrees with the
    /// requested direction, and `Directed` when it does not.
    pub fn absorb(&mut self, absorber: OrganismId, absorbed: OrganismId) -> Option<usize> {
        let (Some(winner), Some(loser)) =
            (self.organisms.get(&absorber), self.organisms.get(&absorbed))
        else {
            trace!(%absorber, %absorbed, "absorb with missing organism ignored");
            return None;
        };
        let (resolved, _, reason) = resolve_absorption(
            Contender::of(winner, &self.cells),
            Contender::of(loser, &self.cells),
            self.config.aggregation.absorb_size_ratio,
        )?;
        let reason = if resolved == absorber {
            reason
        } else {
            AbsorptionReason::Directed
        };
        self.absorb_with(absorber, absorbed, reason)
    }

    /// Absorb in whichever direction the precedence rules pick.
    pub fn merge(&mut self, a: OrganismId, b: OrganismId) -> Option<OrganismId> {
        let (Some(oa), Some(ob)) = (self.organisms.get(&a), self.organisms.get(&b)) else {
            trace!(%a, %b, "merge with missing organism ignored");
            return None;
        };
        let (absorber, absorbed, reason) = resolve_absorption(
            Contender::of(oa, &self.cells),
            Contender::of(ob, &self.cells),
            self.config.aggregation.absorb_size_ratio,
        )?;
        self.absorb_with(absorber, absorbed, reason)?;
        Some(absorber)
    }

    // ---- Snapshots -------------------------------------------------------

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            day: self.day,
            cells_alive: self.live_cell_count(),
            organisms_alive: self.organisms.len(),
            food_patches: self.food.len(),
            connections: self.tissue.connection_count(),
            total_spawned: self.counters.spawned,
            total_divisions: self.counters.divisions,
            total_deaths: self.counters.deaths,
            total_absorptions: self.counters.absorptions,
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let cells = self
            .cells
            .values()
            .filter(|c| c.is_alive())
            .map(|c| CellView {
                id: c.id,
                position: c.position,
                radius: c.radius(&self.config.cell),
                kind: c.kind,
                mood: c.mood(),
                organism: c.organism,
                energy: c.energy(),
            })
            .collect();
        let organisms = self
            .organisms
            .values()
            .filter_map(|o| {
                let centroid = o.centroid(&self.cells)?;
                Some(OrganismView {
                    id: o.id,
                    member_count: o.size(&self.cells),
                    hormone: o.hormone(),
                    aggressive: o.is_aggressive(),
                    centroid,
                    radius: o.bounding_radius(&self.cells, self.config.aggregation.min_bounding_radius),
                })
            })
            .collect();
        let food = self
            .food
            .values()
            .map(|f| FoodView {
                id: f.id,
                position: f.position,
                amount: f.amount(),
            })
            .collect();

        WorldSnapshot {
            day: self.day,
            paused: false,
            cells,
            organisms,
            food,
            connections: self.tissue.connections(),
            stats: self.stats(),
        }
    }

    // ---- Internals shared by the phases ---------------------------------

    fn populate(&mut self) {
        let seeding = self.config.seeding.clone();
        for i in 0..seeding.organisms {
            let center = if i == 0 { Vec3::ZERO } else { self.random_point(0.6) };
            self.spawn_organism_at(center, seeding.cells_per_organism);
        }
        for _ in 0..seeding.loose_cells {
            let position = self.random_point(1.0);
            self.spawn_cell(position, None);
        }
        for _ in 0..self.config.food.patch_count {
            let id = FoodId(self.next_food);
            self.next_food += 1;
            let patch = FoodPatch::spawn(id, &self.config.world.bounds, &self.config.food, self.rng.as_mut());
            self.food.insert(id, patch);
        }
        debug!(
            cells = self.cells.len(),
            organisms = self.organisms.len(),
            food = self.food.len(),
            "world populated"
        );
    }

    fn record(&mut self, event: SimEvent) {
        self.events.push(self.day, event);
    }

    fn new_organism(&mut self) -> OrganismId {
        let id = OrganismId(self.next_organism);
        self.next_organism += 1;
        let organism = Organism::spawn(id, self.day, &self.config.organism, self.rng.as_mut());
        self.organisms.insert(id, organism);
        id
    }

    fn spawn_cell(&mut self, position: Vec3, organism: Option<OrganismId>) -> CellId {
        let id = CellId(self.next_cell);
        self.next_cell += 1;
        let mut cell = Cell::spawn(id, position, &self.config.cell, self.rng.as_mut());
        cell.reflect(&self.config.world.bounds);
        cell.organism = organism;
        let kind = cell.kind;
        self.cells.insert(id, cell);
        if let Some(o) = organism.and_then(|o| self.organisms.get_mut(&o)) {
            o.add_cell(id);
        }
        self.counters.spawned += 1;
        self.record(SimEvent::CellSpawned { cell: id, kind, organism });
        debug!(cell = %id, "cell spawned");
        id
    }

    /// Mark a cell dead and record it. Purging happens in cleanup.
    fn kill_cell(&mut self, id: CellId, cause: DeathCause) {
        let Some(cell) = self.cells.get_mut(&id) else {
            return;
        };
        if cell.die(cause) {
            self.note_death(id, cause);
        }
    }

    /// Record a death the cell already applied to itself.
    fn note_death(&mut self, id: CellId, cause: DeathCause) {
        self.counters.deaths += 1;
        self.record(SimEvent::CellDied { cell: id, cause });
        debug!(cell = %id, %cause, "cell died");
    }

    fn absorb_with(
        &mut self,
        absorber: OrganismId,
        absorbed: OrganismId,
        reason: AbsorptionReason,
    ) -> Option<usize> {
        if absorber == absorbed {
            trace!(organism = %absorber, "self-absorption ignored");
            return None;
        }
        if !self.organisms.contains_key(&absorber) {
            trace!(%absorber, "absorber no longer exists");
            return None;
        }
        let Some(mut victim) = self.organisms.remove(&absorbed) else {
            trace!(%absorbed, "absorbed organism no longer exists");
            return None;
        };

        let members = victim.drain_members();
        let transferred = members.len();
        for id in &members {
            if let Some(cell) = self.cells.get_mut(id) {
                cell.organism = Some(absorber);
            }
        }
        if let Some(winner) = self.organisms.get_mut(&absorber) {
            for id in members {
                winner.add_cell(id);
            }
        }

        self.counters.absorptions += 1;
        self.record(SimEvent::OrganismAbsorbed {
            absorber,
            absorbed,
            transferred,
            reason,
        });
        info!(%absorber, %absorbed, transferred, ?reason, "organism absorbed");
        Some(transferred)
    }

    /// A point inside the world bounds, shrunk toward the center by `scale`.
    fn random_point(&mut self, scale: f64) -> Vec3 {
        let center = self.config.world.bounds.center();
        let half = self.config.world.bounds.size() * (0.5 * scale);
        Vec3::new(
            center.x + self.rng.centered(2.0 * half.x),
            center.y + self.rng.centered(2.0 * half.y),
            center.z + self.rng.centered(2.0 * half.z),
        )
    }

    /// A seed position in a ring around `center`.
    fn scatter_around(&mut self, center: Vec3) -> Vec3 {
        let s = &self.config.seeding;
        let (min, jitter, vertical) = (s.spawn_radius_min, s.spawn_radius_jitter, s.spawn_vertical_jitter);
        let angle = self.rng.next_f64() * TAU;
        let distance = min + self.rng.next_f64() * jitter;
        Vec3::new(
            center.x + angle.cos() * distance,
            center.y + self.rng.centered(vertical),
            center.z + angle.sin() * distance,
        )
    }

    fn rebuild_index(&mut self) {
        let live = self
            .cells
            .values()
            .filter(|c| c.is_alive())
            .map(|c| (c.id, c.position));
        self.index.rebuild(live);
    }
}
