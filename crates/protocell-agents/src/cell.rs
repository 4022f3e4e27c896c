//! Cell: the atomic simulated agent.
//!
//! A cell ages one day per day tick, loses energy to metabolism, rolls a
//! mood from a small decision table and acts on it. Actions that touch
//! other entities (feeding, spawning a child) are returned to the caller
//! as a [`CellAction`] so the world can resolve them against its pools.
//!
//! Connections are not stored on the cell; the runtime keeps them in a
//! separate graph keyed by [`CellId`].

use protocell_core::config::{CellConfig, SimConfig, WorldConfig};
use protocell_core::entropy::Entropy;
use protocell_core::types::*;
use serde::Serialize;
use std::f64::consts::TAU;

/// Something a mood action needs the world to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum CellAction {
    /// Nothing beyond the cell's own state changed.
    Idle,
    /// Feed from the nearest food patch within `radius`.
    Forage { radius: f64 },
    /// Spawn a child. The parent has already paid the energy cost.
    Divide(DivisionPlan),
}

/// Everything the world needs to create a child cell, minus its id.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionPlan {
    pub parent: CellId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub kind: CellKind,
    pub energy: f64,
    pub organism: Option<OrganismId>,
}

/// A simulated cell.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    pub id: CellId,
    pub position: Vec3,
    pub velocity: Vec3,
    energy: f64,
    age: Day,
    /// Age past which the cell dies of old age. Drawn once at creation.
    lifespan: Day,
    pub kind: CellKind,
    mood: Mood,
    /// Mood imposed from outside (reproduction wave), used once at the next roll.
    #[serde(skip)]
    forced_mood: Option<Mood>,
    pub organism: Option<OrganismId>,
    alive: bool,
    death: Option<DeathCause>,
}

impl Cell {
    /// A calm, stationary stem cell. Energy is taken as given.
    pub fn new(id: CellId, position: Vec3, energy: f64, lifespan: Day) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            energy,
            age: 0,
            lifespan,
            kind: CellKind::Stem,
            mood: Mood::Calm,
            forced_mood: None,
            organism: None,
            alive: true,
            death: None,
        }
    }

    /// A freshly seeded stem cell with random energy, drift and lifespan.
    pub fn spawn(id: CellId, position: Vec3, config: &CellConfig, rng: &mut dyn Entropy) -> Self {
        let energy = rng.range(config.spawn_energy_min, config.spawn_energy_max);
        let velocity = Vec3::new(
            rng.centered(config.spawn_speed_horizontal),
            rng.centered(config.spawn_speed_vertical),
            rng.centered(config.spawn_speed_horizontal),
        );
        let jitter = rng.below(config.lifespan_jitter_days as usize) as Day;
        let mut cell = Cell::new(id, position, energy, config.lifespan_base_days + jitter);
        cell.velocity = velocity;
        cell
    }

    /// Build the child described by a division plan.
    pub fn from_plan(id: CellId, plan: &DivisionPlan, config: &CellConfig, rng: &mut dyn Entropy) -> Self {
        let jitter = rng.below(config.lifespan_jitter_days as usize) as Day;
        let mut child = Cell::new(id, plan.position, plan.energy, config.lifespan_base_days + jitter);
        child.velocity = plan.velocity;
        child.kind = plan.kind;
        child.organism = plan.organism;
        child
    }

    pub fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Set energy directly, clamped to `[0, max]`.
    pub fn set_energy(&mut self, energy: f64, max: f64) {
        self.energy = energy.clamp(0.0, max);
    }

    pub fn age(&self) -> Day {
        self.age
    }

    pub fn lifespan(&self) -> Day {
        self.lifespan
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death
    }

    /// Mark the cell dead. Returns false if it already was.
    pub fn die(&mut self, cause: DeathCause) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.death = Some(cause);
        self.velocity = Vec3::ZERO;
        true
    }

    /// Override the next mood roll.
    pub fn force_mood(&mut self, mood: Mood) {
        self.forced_mood = Some(mood);
        self.mood = mood;
    }

    /// Add energy, capped at `max`. Returns the amount actually gained.
    pub fn gain(&mut self, amount: f64, max: f64) -> f64 {
        let before = self.energy;
        self.energy = (self.energy + amount.max(0.0)).min(max);
        self.energy - before
    }

    /// Remove up to `amount` energy. Returns the amount actually removed.
    pub fn drain(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.energy);
        self.energy -= taken;
        taken
    }

    /// Radius for presentation: shrinks a little as energy runs low.
    pub fn radius(&self, config: &CellConfig) -> f64 {
        config.base_radius * (0.75 + 0.25 * (self.energy / config.max_energy).clamp(0.0, 1.0))
    }

    /// One day of aging and metabolism. Returns the cause if the cell died.
    pub fn age_one_day(&mut self, config: &CellConfig) -> Option<DeathCause> {
        if !self.alive {
            return None;
        }
        self.age += 1;
        let decay = config.energy_decay_per_day * self.kind.decay_factor();
        self.energy = (self.energy - decay).clamp(0.0, config.max_energy);

        let cause = if self.energy <= 0.0 {
            DeathCause::Starvation
        } else if self.age > self.lifespan {
            DeathCause::OldAge
        } else {
            return None;
        };
        self.die(cause);
        Some(cause)
    }

    /// Roll today's mood. A forced mood wins once; otherwise one draw
    /// decides against the energy thresholds and probability bands.
    pub fn evaluate_mood(
        &mut self,
        organism_aggressive: bool,
        config: &SimConfig,
        rng: &mut dyn Entropy,
    ) -> Mood {
        if let Some(forced) = self.forced_mood.take() {
            self.mood = forced;
            return forced;
        }

        let m = &config.mood;
        let r = rng.next_f64();
        self.mood = if self.energy < m.hungry_threshold {
            Mood::Hungry
        } else if organism_aggressive && r < m.predatory_probability {
            Mood::Predatory
        } else if self.energy > m.divide_mood_threshold && r < m.divide_mood_probability {
            Mood::Dividing
        } else if r < m.sleepy_band {
            Mood::Sleepy
        } else if r < m.calm_band {
            Mood::Calm
        } else {
            Mood::Energetic
        };
        self.mood
    }

    /// Apply today's mood. Energy is clamped afterwards by [`Cell::settle`].
    pub fn perform_mood_action(&mut self, config: &SimConfig, rng: &mut dyn Entropy) -> CellAction {
        let m = &config.mood;
        let max_energy = config.cell.max_energy;
        let push = self.kind.impulse_factor();

        match self.mood {
            Mood::Calm => {
                self.gain(m.calm_restore, max_energy);
                CellAction::Idle
            }
            Mood::Hungry => {
                let impulse = Vec3::new(
                    rng.centered(m.hungry_impulse),
                    rng.centered(m.hungry_impulse * 0.75),
                    rng.centered(m.hungry_impulse),
                );
                self.kick(impulse * push, &config.world);
                CellAction::Forage {
                    radius: config.food.feed_radius * self.kind.forage_factor(),
                }
            }
            Mood::Energetic => {
                let impulse = Vec3::new(
                    rng.centered(m.energetic_impulse),
                    0.0,
                    rng.centered(m.energetic_impulse),
                );
                self.kick(impulse * push, &config.world);
                self.energy -= m.energetic_cost;
                CellAction::Idle
            }
            Mood::Sleepy => {
                self.gain(m.sleepy_restore, max_energy);
                self.velocity = self.velocity * m.sleepy_damping;
                CellAction::Idle
            }
            Mood::Dividing => {
                let d = &config.division;
                if self.energy > d.energy_floor && rng.chance(d.probability) {
                    if let Some(plan) = self.plan_division(config, rng) {
                        return CellAction::Divide(plan);
                    }
                }
                self.gain(m.calm_restore, max_energy);
                CellAction::Idle
            }
            Mood::Predatory => {
                let impulse = Vec3::new(
                    rng.centered(m.predatory_impulse),
                    rng.centered(m.predatory_impulse),
                    rng.centered(m.predatory_impulse),
                );
                self.kick(impulse * push, &config.world);
                self.energy -= m.predatory_cost;
                CellAction::Idle
            }
        }
    }

    /// Clamp energy after an action and starve the cell if nothing is left.
    pub fn settle(&mut self, max_energy: f64) -> Option<DeathCause> {
        if !self.alive {
            return None;
        }
        self.energy = self.energy.clamp(0.0, max_energy);
        if self.energy <= 0.0 {
            self.die(DeathCause::Starvation);
            return Some(DeathCause::Starvation);
        }
        None
    }

    /// Pay the division cost and describe the child. `None` when the cell
    /// cannot afford it; the cell is left untouched in that case.
    pub fn plan_division(&mut self, config: &SimConfig, rng: &mut dyn Entropy) -> Option<DivisionPlan> {
        let d = &config.division;
        if !self.alive || self.energy <= d.cost + d.reserve {
            return None;
        }
        self.energy -= d.cost;

        let angle = rng.next_f64() * TAU;
        let distance = d.offset_distance + rng.next_f64() * d.offset_jitter;
        let position = Vec3::new(
            self.position.x + angle.cos() * distance,
            self.position.y + rng.centered(d.vertical_jitter),
            self.position.z + angle.sin() * distance,
        );

        let kind = match self.kind {
            CellKind::Stem if rng.chance(d.differentiation_probability) => {
                CellKind::DIFFERENTIATED[rng.below(CellKind::DIFFERENTIATED.len())]
            }
            kind => kind,
        };

        Some(DivisionPlan {
            parent: self.id,
            position,
            velocity: self.velocity * 0.5,
            kind,
            energy: d.cost,
            organism: self.organism,
        })
    }

    /// Continuous motion: integrate velocity, damp, cap speed and bounce
    /// off the world faces.
    pub fn integrate(&mut self, seconds: f64, world: &WorldConfig) {
        if !self.alive {
            return;
        }
        self.position += self.velocity * (seconds * world.world_scale);
        self.velocity = (self.velocity * world.damping).clamp_length(world.max_speed);
        self.reflect(&world.bounds);
    }

    /// Clamp the position into `bounds`, turning the velocity inward on
    /// every axis that touched a face.
    pub fn reflect(&mut self, bounds: &Bounds) {
        reflect_axis(&mut self.position.x, &mut self.velocity.x, bounds.min.x, bounds.max.x);
        reflect_axis(&mut self.position.y, &mut self.velocity.y, bounds.min.y, bounds.max.y);
        reflect_axis(&mut self.position.z, &mut self.velocity.z, bounds.min.z, bounds.max.z);
    }

    fn kick(&mut self, impulse: Vec3, world: &WorldConfig) {
        self.velocity = (self.velocity + impulse).clamp_length(world.max_speed);
    }
}

fn reflect_axis(position: &mut f64, velocity: &mut f64, min: f64, max: f64) {
    if *position <= min {
        *position = min;
        *velocity = velocity.abs();
    } else if *position >= max {
        *position = max;
        *velocity = -velocity.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocell_core::entropy::{ScriptedEntropy, SeededEntropy};

    fn config() -> SimConfig {
        SimConfig::default()
    }

    fn cell(energy: f64) -> Cell {
        Cell::new(CellId(1), Vec3::ZERO, energy, 400)
    }

    #[test]
    fn spawn_respects_configured_ranges() {
        let cfg = config();
        let mut rng = SeededEntropy::new(11);
        for i in 0..200 {
            let c = Cell::spawn(CellId(i), Vec3::ZERO, &cfg.cell, &mut rng);
            assert!(c.energy() >= 40.0 && c.energy() < 100.0);
            assert!(c.velocity.x.abs() <= 20.0 && c.velocity.z.abs() <= 20.0);
            assert!(c.velocity.y.abs() <= 12.0);
            assert!(c.lifespan() >= 300 && c.lifespan() < 500);
            assert_eq!(c.kind, CellKind::Stem);
        }
    }

    #[test]
    fn aging_decays_energy_by_kind() {
        let cfg = config();
        let mut stem = cell(50.0);
        let mut metabolic = cell(50.0).with_kind(CellKind::Metabolic);
        stem.age_one_day(&cfg.cell);
        metabolic.age_one_day(&cfg.cell);
        assert!((stem.energy() - 48.8).abs() < 1e-9);
        assert!((metabolic.energy() - (50.0 - 1.2 * 0.7)).abs() < 1e-9);
        assert_eq!(stem.age(), 1);
    }

    #[test]
    fn aging_starves_at_zero_energy() {
        let cfg = config();
        let mut c = cell(1.0);
        assert_eq!(c.age_one_day(&cfg.cell), Some(DeathCause::Starvation));
        assert!(!c.is_alive());
        assert_eq!(c.energy(), 0.0);
        // dead cells don't age further
        assert_eq!(c.age_one_day(&cfg.cell), None);
        assert_eq!(c.age(), 1);
    }

    #[test]
    fn aging_past_lifespan_dies_of_old_age() {
        let cfg = config();
        let mut c = Cell::new(CellId(1), Vec3::ZERO, 100.0, 2);
        assert_eq!(c.age_one_day(&cfg.cell), None);
        assert_eq!(c.age_one_day(&cfg.cell), None);
        assert_eq!(c.age_one_day(&cfg.cell), Some(DeathCause::OldAge));
    }

    #[test]
    fn low_energy_is_always_hungry() {
        let cfg = config();
        let mut c = cell(10.0);
        let mut rng = ScriptedEntropy::new([0.0, 0.99]);
        assert_eq!(c.evaluate_mood(false, &cfg, &mut rng), Mood::Hungry);
        assert_eq!(c.evaluate_mood(true, &cfg, &mut rng), Mood::Hungry);
    }

    #[test]
    fn mood_bands() {
        let cfg = config();
        let mut c = cell(50.0);
        let cases = [(0.05, Mood::Sleepy), (0.3, Mood::Calm), (0.7, Mood::Energetic)];
        for (draw, expected) in cases {
            let mut rng = ScriptedEntropy::new([draw]);
            assert_eq!(c.evaluate_mood(false, &cfg, &mut rng), expected, "draw {draw}");
        }
    }

    #[test]
    fn high_energy_low_draw_wants_to_divide() {
        let cfg = config();
        let mut c = cell(90.0);
        let mut rng = ScriptedEntropy::new([0.2]);
        assert_eq!(c.evaluate_mood(false, &cfg, &mut rng), Mood::Dividing);
    }

    #[test]
    fn aggressive_organism_makes_predators() {
        let cfg = config();
        let mut c = cell(50.0);
        let mut rng = ScriptedEntropy::new([0.2, 0.2]);
        assert_eq!(c.evaluate_mood(true, &cfg, &mut rng), Mood::Predatory);
        assert_eq!(c.evaluate_mood(false, &cfg, &mut rng), Mood::Calm);
    }

    #[test]
    fn forced_mood_wins_once() {
        let cfg = config();
        let mut c = cell(50.0);
        c.force_mood(Mood::Dividing);
        let mut rng = ScriptedEntropy::new([0.7]);
        assert_eq!(c.evaluate_mood(false, &cfg, &mut rng), Mood::Dividing);
        assert_eq!(rng.drawn(), 0);
        assert_eq!(c.evaluate_mood(false, &cfg, &mut rng), Mood::Energetic);
    }

    #[test]
    fn failed_division_acts_calm() {
        let cfg = config();
        let mut c = cell(60.0);
        c.force_mood(Mood::Dividing);
        let mut rng = ScriptedEntropy::constant(0.0);
        c.evaluate_mood(false, &cfg, &mut rng);
        // below the 70 floor
        assert_eq!(c.perform_mood_action(&cfg, &mut rng), CellAction::Idle);
        assert!((c.energy() - 60.6).abs() < 1e-9);
    }

    #[test]
    fn division_moves_energy_to_child() {
        let cfg = config();
        let mut c = cell(100.0).with_velocity(Vec3::new(4.0, 2.0, -6.0));
        c.organism = Some(OrganismId(9));
        c.force_mood(Mood::Dividing);
        // division chance, angle, distance, vertical, differentiation
        let mut rng = ScriptedEntropy::new([0.0, 0.0, 0.5, 0.5, 0.9]);
        c.evaluate_mood(false, &cfg, &mut rng);
        let plan = match c.perform_mood_action(&cfg, &mut rng) {
            CellAction::Divide(plan) => plan,
            other => panic!("expected division, got {other:?}"),
        };
        assert!((c.energy() - 65.0).abs() < 1e-9);
        assert_eq!(plan.energy, 35.0);
        assert_eq!(plan.organism, Some(OrganismId(9)));
        assert_eq!(plan.kind, CellKind::Stem);
        assert_eq!(plan.velocity, Vec3::new(2.0, 1.0, -3.0));
        assert!((plan.position.x - 29.0).abs() < 1e-9);
        assert!(plan.position.z.abs() < 1e-9);
        assert_eq!(plan.position.y, 0.0);
    }

    #[test]
    fn stem_child_can_differentiate() {
        let cfg = config();
        let mut c = cell(100.0);
        // angle, distance, vertical, differentiation hit, kind index
        let mut rng = ScriptedEntropy::new([0.0, 0.0, 0.5, 0.1, 0.3]);
        let plan = c.plan_division(&cfg, &mut rng).unwrap();
        assert_eq!(plan.kind, CellKind::Motive);
    }

    #[test]
    fn division_refused_without_reserve() {
        let cfg = config();
        let mut c = cell(43.0);
        let mut rng = ScriptedEntropy::constant(0.0);
        assert!(c.plan_division(&cfg, &mut rng).is_none());
        assert_eq!(c.energy(), 43.0);
    }

    #[test]
    fn predatory_action_costs_energy_and_can_starve() {
        let cfg = config();
        let mut c = cell(1.0);
        c.force_mood(Mood::Predatory);
        let mut rng = ScriptedEntropy::constant(0.5);
        c.evaluate_mood(true, &cfg, &mut rng);
        c.perform_mood_action(&cfg, &mut rng);
        assert_eq!(c.settle(cfg.cell.max_energy), Some(DeathCause::Starvation));
        assert_eq!(c.energy(), 0.0);
    }

    #[test]
    fn sensory_cells_forage_wider() {
        let cfg = config();
        let mut c = cell(10.0).with_kind(CellKind::Sensory);
        let mut rng = ScriptedEntropy::constant(0.5);
        c.evaluate_mood(false, &cfg, &mut rng);
        assert_eq!(
            c.perform_mood_action(&cfg, &mut rng),
            CellAction::Forage { radius: cfg.food.feed_radius * 1.5 }
        );
    }

    #[test]
    fn reflection_clamps_and_flips() {
        let cfg = config();
        let mut c = cell(50.0).with_velocity(Vec3::new(50.0, -30.0, 0.0));
        c.position = Vec3::new(415.0, -195.0, 0.0);
        c.integrate(1.0, &cfg.world);
        assert_eq!(c.position.x, 420.0);
        assert_eq!(c.position.y, -200.0);
        assert!(c.velocity.x < 0.0);
        assert!(c.velocity.y > 0.0);

        c.integrate(1.0 / 60.0, &cfg.world);
        assert!(cfg.world.bounds.contains(&c.position));
    }

    #[test]
    fn radius_tracks_energy() {
        let cfg = config();
        assert_eq!(cell(120.0).radius(&cfg.cell), 8.0);
        assert_eq!(cell(0.0).radius(&cfg.cell), 6.0);
    }
}
