//! Default tuning of the behavior model.
//!
//! These are the decision-table thresholds and probabilities the engine
//! ships with. Every one of them is overridable through [`crate::config`];
//! the constants only name the defaults.

// Energy
pub const MAX_ENERGY: f64 = 120.0;
pub const ENERGY_DECAY_PER_DAY: f64 = 1.2;
pub const SPAWN_ENERGY_MIN: f64 = 40.0;
pub const SPAWN_ENERGY_MAX: f64 = 100.0;

// Lifespan: base + uniform jitter, drawn once per cell
pub const LIFESPAN_BASE_DAYS: u64 = 300;
pub const LIFESPAN_JITTER_DAYS: u64 = 200;

// Mood decision table
pub const HUNGRY_THRESHOLD: f64 = 20.0;
pub const DIVIDE_MOOD_THRESHOLD: f64 = 80.0;
pub const DIVIDE_MOOD_PROBABILITY: f64 = 0.25;
pub const PREDATORY_PROBABILITY: f64 = 0.3;
pub const SLEEPY_BAND: f64 = 0.12;
pub const CALM_BAND: f64 = 0.5;

// Mood actions
pub const CALM_RESTORE: f64 = 0.6;
pub const SLEEPY_RESTORE: f64 = 1.5;
pub const SLEEPY_DAMPING: f64 = 0.8;
pub const HUNGRY_IMPULSE: f64 = 4.0;
pub const ENERGETIC_IMPULSE: f64 = 6.0;
pub const ENERGETIC_COST: f64 = 1.0;
pub const PREDATORY_IMPULSE: f64 = 8.0;
pub const PREDATORY_COST: f64 = 1.5;

// Division
pub const DIVISION_ENERGY_FLOOR: f64 = 70.0;
pub const DIVISION_PROBABILITY: f64 = 0.12;
pub const DIVISION_COST: f64 = 35.0;
pub const DIVISION_RESERVE: f64 = 8.0;
pub const DIFFERENTIATION_PROBABILITY: f64 = 0.3;

// Organism hormone / aggression / reproduction wave
pub const HORMONE_INITIAL_MAX: f64 = 0.12;
pub const HORMONE_WALK: f64 = 0.02;
pub const HORMONE_SMALL_SCALE: f64 = 6.0;
pub const HORMONE_SMALL_BIAS: f64 = 0.01;
pub const HORMONE_ENERGY_BIAS: f64 = 0.02;
pub const AGGRESSION_ENERGY_CEILING: f64 = 30.0;
pub const AGGRESSION_SIZE_FLOOR: usize = 6;
pub const AGGRESSION_PROBABILITY: f64 = 0.06;
pub const WAVE_HORMONE_THRESHOLD: f64 = 0.6;
pub const WAVE_SIZE_FLOOR: usize = 3;
pub const WAVE_PROBABILITY: f64 = 0.18;
pub const WAVE_ENERGY_BOOST: f64 = 8.0;
pub const WAVE_MEMBER_DIVISOR: usize = 3;
pub const WAVE_HORMONE_DISCOUNT: f64 = 0.4;

// Aggregation and predation
pub const CONNECT_DISTANCE: f64 = 48.0;
pub const CONNECT_CHANCE: f64 = 0.14;
pub const MAX_CONNECTIONS_PER_CELL: usize = 8;
pub const TOUCH_DISTANCE: f64 = 60.0;
pub const MIN_BOUNDING_RADIUS: f64 = 40.0;
pub const ABSORB_SIZE_RATIO: f64 = 1.6;
pub const BITE_RADIUS: f64 = 20.0;
pub const BITE_ENERGY: f64 = 6.0;

// Food
pub const FOOD_PATCHES: usize = 10;
pub const FOOD_AMOUNT_MIN: f64 = 80.0;
pub const FOOD_AMOUNT_MAX: f64 = 240.0;
pub const FOOD_REGEN_PER_DAY: f64 = 6.0;
pub const FEED_RADIUS: f64 = 40.0;
pub const ENERGY_PER_FEED: f64 = 18.0;

// Motion and world
pub const CELL_BASE_RADIUS: f64 = 8.0;
pub const MOTION_DAMPING: f64 = 0.992;
pub const MAX_SPEED: f64 = 60.0;
pub const WORLD_SCALE: f64 = 1.0;
pub const WORLD_HALF_WIDTH: f64 = 420.0;
pub const WORLD_HALF_HEIGHT: f64 = 200.0;
/// One simulated day per minute of real time.
pub const DAY_LENGTH_SECS: f64 = 60.0;
/// Longest accepted day: one year of real time.
pub const MAX_DAY_LENGTH_SECS: f64 = 365.0 * 24.0 * 3600.0;

// Spatial index
pub const OCTREE_CAPACITY: usize = 8;
pub const OCTREE_MAX_DEPTH: usize = 6;
pub const OCTREE_DEPTH_LIMIT: usize = 32;
