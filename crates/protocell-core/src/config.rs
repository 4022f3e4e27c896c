//! Simulation configuration.
//!
//! Every tunable of the behavior model lives here, grouped by concern.
//! Sections are `#[serde(default)]`, so a config file only has to name
//! the values it changes. Call [`SimConfig::validate`] before building a
//! world; the runtime does this for you.

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::{Bounds, Vec3};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What happens to food patches over time.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoodMode {
    /// Patches regain a fixed amount each day up to their capacity and never vanish.
    #[default]
    Regenerating,
    /// Patches never regrow and are removed once exhausted.
    Depleting,
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the random stream. `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub world: WorldConfig,
    pub cell: CellConfig,
    pub mood: MoodConfig,
    pub division: DivisionConfig,
    pub organism: OrganismConfig,
    pub aggregation: AggregationConfig,
    pub food: FoodConfig,
    pub substrate: SubstrateConfig,
    pub seeding: SeedingConfig,
}

/// World volume, time scale and motion integration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Real seconds per simulated day.
    pub day_length_secs: f64,
    /// Multiplier applied to velocity during motion integration.
    pub world_scale: f64,
    /// Per-frame velocity damping factor, in (0, 1].
    pub damping: f64,
    /// Speed cap applied after every impulse and integration step.
    pub max_speed: f64,
    /// Entities a leaf holds before it splits.
    pub octree_capacity: usize,
    /// Depth past which leaves stop splitting.
    pub octree_max_depth: usize,
    /// The bounded volume cells reflect off.
    pub bounds: Bounds,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            day_length_secs: DAY_LENGTH_SECS,
            world_scale: WORLD_SCALE,
            damping: MOTION_DAMPING,
            max_speed: MAX_SPEED,
            octree_capacity: OCTREE_CAPACITY,
            octree_max_depth: OCTREE_MAX_DEPTH,
            bounds: Bounds::centered(WORLD_HALF_WIDTH, WORLD_HALF_HEIGHT, WORLD_HALF_WIDTH),
        }
    }
}

/// Per-cell energy, lifespan and spawn parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    pub max_energy: f64,
    pub energy_decay_per_day: f64,
    pub spawn_energy_min: f64,
    pub spawn_energy_max: f64,
    /// Visual radius at full energy.
    pub base_radius: f64,
    pub lifespan_base_days: u64,
    /// Uniform jitter added to the base lifespan, drawn once per cell.
    pub lifespan_jitter_days: u64,
    /// Full span of the initial horizontal velocity (centered on zero).
    pub spawn_speed_horizontal: f64,
    /// Full span of the initial vertical velocity (centered on zero).
    pub spawn_speed_vertical: f64,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            max_energy: MAX_ENERGY,
            energy_decay_per_day: ENERGY_DECAY_PER_DAY,
            spawn_energy_min: SPAWN_ENERGY_MIN,
            spawn_energy_max: SPAWN_ENERGY_MAX,
            base_radius: CELL_BASE_RADIUS,
            lifespan_base_days: LIFESPAN_BASE_DAYS,
            lifespan_jitter_days: LIFESPAN_JITTER_DAYS,
            spawn_speed_horizontal: 40.0,
            spawn_speed_vertical: 24.0,
        }
    }
}

/// Mood decision table and mood action effects.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Below this energy a cell is always hungry.
    pub hungry_threshold: f64,
    /// Above this energy a cell may want to divide.
    pub divide_mood_threshold: f64,
    pub divide_mood_probability: f64,
    /// Chance a cell of an aggressive organism turns predatory.
    pub predatory_probability: f64,
    /// Draws below this are Sleepy.
    pub sleepy_band: f64,
    /// Draws in `[sleepy_band, calm_band)` are Calm; the rest are Energetic.
    pub calm_band: f64,
    pub calm_restore: f64,
    pub sleepy_restore: f64,
    pub sleepy_damping: f64,
    pub hungry_impulse: f64,
    pub energetic_impulse: f64,
    pub energetic_cost: f64,
    pub predatory_impulse: f64,
    pub predatory_cost: f64,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            hungry_threshold: HUNGRY_THRESHOLD,
            divide_mood_threshold: DIVIDE_MOOD_THRESHOLD,
            divide_mood_probability: DIVIDE_MOOD_PROBABILITY,
            predatory_probability: PREDATORY_PROBABILITY,
            sleepy_band: SLEEPY_BAND,
            calm_band: CALM_BAND,
            calm_restore: CALM_RESTORE,
            sleepy_restore: SLEEPY_RESTORE,
            sleepy_damping: SLEEPY_DAMPING,
            hungry_impulse: HUNGRY_IMPULSE,
            energetic_impulse: ENERGETIC_IMPULSE,
            energetic_cost: ENERGETIC_COST,
            predatory_impulse: PREDATORY_IMPULSE,
            predatory_cost: PREDATORY_COST,
        }
    }
}

/// Cell division.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DivisionConfig {
    /// A dividing cell needs more than this energy to attempt division.
    pub energy_floor: f64,
    /// Second, independent draw that must pass for division to happen.
    pub probability: f64,
    /// Energy moved from parent to child.
    pub cost: f64,
    /// Energy the parent must keep on top of the cost.
    pub reserve: f64,
    /// Chance a stem parent's child specialises.
    pub differentiation_probability: f64,
    /// Minimum horizontal distance of the child from its parent.
    pub offset_distance: f64,
    pub offset_jitter: f64,
    pub vertical_jitter: f64,
}

impl Default for DivisionConfig {
    fn default() -> Self {
        Self {
            energy_floor: DIVISION_ENERGY_FLOOR,
            probability: DIVISION_PROBABILITY,
            cost: DIVISION_COST,
            reserve: DIVISION_RESERVE,
            differentiation_probability: DIFFERENTIATION_PROBABILITY,
            offset_distance: CELL_BASE_RADIUS * 3.0,
            offset_jitter: 10.0,
            vertical_jitter: 20.0,
        }
    }
}

/// Organism hormone dynamics, aggression and reproduction waves.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganismConfig {
    pub hormone_initial_max: f64,
    /// Full span of the daily random hormone step.
    pub hormone_walk: f64,
    /// Member count at which the small-organism nudge has mostly faded.
    pub small_size_scale: f64,
    pub small_bias: f64,
    pub energy_bias: f64,
    pub aggression_energy_ceiling: f64,
    pub aggression_size_floor: usize,
    pub aggression_probability: f64,
    pub wave_hormone_threshold: f64,
    pub wave_size_floor: usize,
    pub wave_probability: f64,
    pub wave_energy_boost: f64,
    /// One in this many members is pushed into division by a wave.
    pub wave_member_divisor: usize,
    /// Hormone multiplier applied after a wave.
    pub wave_hormone_discount: f64,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            hormone_initial_max: HORMONE_INITIAL_MAX,
            hormone_walk: HORMONE_WALK,
            small_size_scale: HORMONE_SMALL_SCALE,
            small_bias: HORMONE_SMALL_BIAS,
            energy_bias: HORMONE_ENERGY_BIAS,
            aggression_energy_ceiling: AGGRESSION_ENERGY_CEILING,
            aggression_size_floor: AGGRESSION_SIZE_FLOOR,
            aggression_probability: AGGRESSION_PROBABILITY,
            wave_hormone_threshold: WAVE_HORMONE_THRESHOLD,
            wave_size_floor: WAVE_SIZE_FLOOR,
            wave_probability: WAVE_PROBABILITY,
            wave_energy_boost: WAVE_ENERGY_BOOST,
            wave_member_divisor: WAVE_MEMBER_DIVISOR,
            wave_hormone_discount: WAVE_HORMONE_DISCOUNT,
        }
    }
}

/// Connection forming, organism absorption and predation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub connect_distance: f64,
    /// Base connection chance, scaled by substrate adhesion.
    pub connect_chance: f64,
    pub max_connections_per_cell: usize,
    /// Organisms closer than this always touch, whatever their radii. Acts
    /// as a floor on the touch reach, so it only decides collisions when
    /// `min_bounding_radius` is below half of it.
    pub touch_distance: f64,
    /// Smallest bounding radius an organism is given for collisions.
    pub min_bounding_radius: f64,
    /// Live-count ratio at which the larger organism absorbs the smaller.
    pub absorb_size_ratio: f64,
    pub bite_radius: f64,
    pub bite_energy: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            connect_distance: CONNECT_DISTANCE,
            connect_chance: CONNECT_CHANCE,
            max_connections_per_cell: MAX_CONNECTIONS_PER_CELL,
            touch_distance: TOUCH_DISTANCE,
            min_bounding_radius: MIN_BOUNDING_RADIUS,
            absorb_size_ratio: ABSORB_SIZE_RATIO,
            bite_radius: BITE_RADIUS,
            bite_energy: BITE_ENERGY,
        }
    }
}

/// Food patches.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub mode: FoodMode,
    pub patch_count: usize,
    pub amount_min: f64,
    pub amount_max: f64,
    pub regen_per_day: f64,
    pub feed_radius: f64,
    pub energy_per_feed: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            mode: FoodMode::default(),
            patch_count: FOOD_PATCHES,
            amount_min: FOOD_AMOUNT_MIN,
            amount_max: FOOD_AMOUNT_MAX,
            regen_per_day: FOOD_REGEN_PER_DAY,
            feed_radius: FEED_RADIUS,
            energy_per_feed: ENERGY_PER_FEED,
        }
    }
}

/// Adhesion field that modulates connection chance.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstrateConfig {
    /// When disabled, adhesion is 1.0 everywhere.
    pub enabled: bool,
    /// Grid cells along x, y and z.
    pub resolution: [usize; 3],
    pub base_min: f64,
    pub base_span: f64,
    /// Amplitude of the smooth sinusoidal patches.
    pub ripple: f64,
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            resolution: [24, 12, 24],
            base_min: 0.2,
            base_span: 0.6,
            ripple: 0.05,
        }
    }
}

/// Initial population and the shape of spawned organisms.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingConfig {
    /// Organisms seeded at start; the first sits at the world origin.
    pub organisms: usize,
    pub cells_per_organism: usize,
    /// Organism-less stem cells scattered at random.
    pub loose_cells: usize,
    pub spawn_radius_min: f64,
    pub spawn_radius_jitter: f64,
    pub spawn_vertical_jitter: f64,
    /// Cell count range for randomly spawned organisms, inclusive.
    pub random_organism_min_cells: usize,
    pub random_organism_max_cells: usize,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            organisms: 1,
            cells_per_organism: 6,
            loose_cells: 4,
            spawn_radius_min: 30.0,
            spawn_radius_jitter: 36.0,
            spawn_vertical_jitter: 40.0,
            random_organism_min_cells: 4,
            random_organism_max_cells: 9,
        }
    }
}

impl SimConfig {
    /// Real time per simulated day.
    pub fn day_length(&self) -> Duration {
        Duration::from_secs_f64(self.world.day_length_secs)
    }

    /// Check every section. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_world()?;
        self.validate_cell()?;
        self.validate_mood()?;
        self.validate_division()?;
        self.validate_organism()?;
        self.validate_aggregation()?;
        self.validate_food()?;
        self.validate_substrate()?;
        self.validate_seeding()?;
        Ok(())
    }

    fn validate_world(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        positive("day_length_secs", w.day_length_secs)?;
        in_range("day_length_secs", w.day_length_secs, 0.0, MAX_DAY_LENGTH_SECS)?;
        positive("world_scale", w.world_scale)?;
        in_range("damping", w.damping, 0.0, 1.0)?;
        positive("max_speed", w.max_speed)?;
        if w.octree_capacity == 0 {
            return Err(ConfigError::ZeroCount("octree_capacity"));
        }
        in_range(
            "octree_max_depth",
            w.octree_max_depth as f64,
            0.0,
            OCTREE_DEPTH_LIMIT as f64,
        )?;
        if !w.bounds.is_valid() {
            return Err(ConfigError::InvalidBounds);
        }
        Ok(())
    }

    fn validate_cell(&self) -> Result<(), ConfigError> {
        let c = &self.cell;
        positive("max_energy", c.max_energy)?;
        non_negative("energy_decay_per_day", c.energy_decay_per_day)?;
        positive("base_radius", c.base_radius)?;
        in_range("spawn_energy_min", c.spawn_energy_min, 0.0, c.max_energy)?;
        in_range("spawn_energy_max", c.spawn_energy_max, 0.0, c.max_energy)?;
        ordered("spawn_energy", c.spawn_energy_min, c.spawn_energy_max)?;
        non_negative("spawn_speed_horizontal", c.spawn_speed_horizontal)?;
        non_negative("spawn_speed_vertical", c.spawn_speed_vertical)?;
        Ok(())
    }

    fn validate_mood(&self) -> Result<(), ConfigError> {
        let m = &self.mood;
        probability("divide_mood_probability", m.divide_mood_probability)?;
        probability("predatory_probability", m.predatory_probability)?;
        if !(m.sleepy_band >= 0.0 && m.sleepy_band < m.calm_band && m.calm_band <= 1.0) {
            return Err(ConfigError::OverlappingMoodBands {
                sleepy: m.sleepy_band,
                calm: m.calm_band,
            });
        }
        non_negative("hungry_threshold", m.hungry_threshold)?;
        non_negative("divide_mood_threshold", m.divide_mood_threshold)?;
        non_negative("calm_restore", m.calm_restore)?;
        non_negative("sleepy_restore", m.sleepy_restore)?;
        in_range("sleepy_damping", m.sleepy_damping, 0.0, 1.0)?;
        non_negative("hungry_impulse", m.hungry_impulse)?;
        non_negative("energetic_impulse", m.energetic_impulse)?;
        non_negative("energetic_cost", m.energetic_cost)?;
        non_negative("predatory_impulse", m.predatory_impulse)?;
        non_negative("predatory_cost", m.predatory_cost)?;
        Ok(())
    }

    fn validate_division(&self) -> Result<(), ConfigError> {
        let d = &self.division;
        probability("division_probability", d.probability)?;
        probability("differentiation_probability", d.differentiation_probability)?;
        non_negative("division_energy_floor", d.energy_floor)?;
        positive("division_cost", d.cost)?;
        non_negative("division_reserve", d.reserve)?;
        non_negative("offset_distance", d.offset_distance)?;
        non_negative("offset_jitter", d.offset_jitter)?;
        non_negative("vertical_jitter", d.vertical_jitter)?;
        Ok(())
    }

    fn validate_organism(&self) -> Result<(), ConfigError> {
        let o = &self.organism;
        probability("hormone_initial_max", o.hormone_initial_max)?;
        non_negative("hormone_walk", o.hormone_walk)?;
        positive("small_size_scale", o.small_size_scale)?;
        probability("aggression_probability", o.aggression_probability)?;
        probability("wave_hormone_threshold", o.wave_hormone_threshold)?;
        probability("wave_probability", o.wave_probability)?;
        probability("wave_hormone_discount", o.wave_hormone_discount)?;
        non_negative("wave_energy_boost", o.wave_energy_boost)?;
        if o.wave_member_divisor == 0 {
            return Err(ConfigError::ZeroCount("wave_member_divisor"));
        }
        Ok(())
    }

    fn validate_aggregation(&self) -> Result<(), ConfigError> {
        let a = &self.aggregation;
        positive("connect_distance", a.connect_distance)?;
        probability("connect_chance", a.connect_chance)?;
        non_negative("touch_distance", a.touch_distance)?;
        non_negative("min_bounding_radius", a.min_bounding_radius)?;
        if !(a.absorb_size_ratio.is_finite() && a.absorb_size_ratio >= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "absorb_size_ratio",
                min: 1.0,
                max: f64::INFINITY,
                value: a.absorb_size_ratio,
            });
        }
        non_negative("bite_radius", a.bite_radius)?;
        non_negative("bite_energy", a.bite_energy)?;
        Ok(())
    }

    fn validate_food(&self) -> Result<(), ConfigError> {
        let f = &self.food;
        non_negative("food_amount_min", f.amount_min)?;
        non_negative("food_amount_max", f.amount_max)?;
        ordered("food_amount", f.amount_min, f.amount_max)?;
        non_negative("regen_per_day", f.regen_per_day)?;
        non_negative("feed_radius", f.feed_radius)?;
        non_negative("energy_per_feed", f.energy_per_feed)?;
        Ok(())
    }

    fn validate_substrate(&self) -> Result<(), ConfigError> {
        let s = &self.substrate;
        if s.resolution.iter().any(|&n| n == 0) {
            return Err(ConfigError::ZeroCount("substrate resolution"));
        }
        probability("substrate base_min", s.base_min)?;
        probability("substrate base_span", s.base_span)?;
        non_negative("substrate ripple", s.ripple)?;
        Ok(())
    }

    fn validate_seeding(&self) -> Result<(), ConfigError> {
        let s = &self.seeding;
        non_negative("spawn_radius_min", s.spawn_radius_min)?;
        non_negative("spawn_radius_jitter", s.spawn_radius_jitter)?;
        non_negative("spawn_vertical_jitter", s.spawn_vertical_jitter)?;
        if s.random_organism_min_cells == 0 {
            return Err(ConfigError::ZeroCount("random_organism_min_cells"));
        }
        ordered(
            "random_organism_cells",
            s.random_organism_min_cells as f64,
            s.random_organism_max_cells as f64,
        )?;
        Ok(())
    }
}

impl WorldConfig {
    pub fn with_bounds(mut self, min: Vec3, max: Vec3) -> Self {
        self.bounds = Bounds::new(min, max);
        self
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    in_range(field, value, 0.0, f64::INFINITY)
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    in_range(field, value, 0.0, 1.0)
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, min, max, value })
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
