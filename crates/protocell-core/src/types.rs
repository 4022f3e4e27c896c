//! Shared types used across all protocell crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Unique identifier for a cell in the world's entity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell#{}", self.0)
    }
}

/// Unique identifier for an organism in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Organism#{}", self.0)
    }
}

/// Unique identifier for a food patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(pub u64);

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Food#{}", self.0)
    }
}

/// Number of simulated days elapsed.
pub type Day = u64;

/// A point or direction in continuous simulated space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn distance_to(&self, other: &Vec3) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Vec3) -> f64 {
        (*self - *other).length_squared()
    }

    pub fn midpoint(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }

    /// Rescale to at most `max` length, keeping direction.
    pub fn clamp_length(self, max: f64) -> Vec3 {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Axis-aligned box. Used for the world volume and for octree regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A box spanning `[-half, half]` on every axis.
    pub fn centered(half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self {
            min: Vec3::new(-half_x, -half_y, -half_z),
            max: Vec3::new(half_x, half_y, half_z),
        }
    }

    /// Degenerate box around one point; grows with [`Bounds::include`].
    pub fn point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    pub fn center(&self) -> Vec3 {
        self.min.midpoint(&self.max)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: &Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn include(&mut self, p: &Vec3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Squared distance from `p` to the nearest point of the box (0 inside).
    pub fn distance_squared_to(&self, p: &Vec3) -> f64 {
        let dx = (self.min.x - p.x).max(0.0).max(p.x - self.max.x);
        let dy = (self.min.y - p.y).max(0.0).max(p.y - self.max.y);
        let dz = (self.min.z - p.z).max(0.0).max(p.z - self.max.z);
        dx * dx + dy * dy + dz * dz
    }

    /// Whether min <= max on every axis and all coordinates are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x < self.max.x
            && self.min.y < self.max.y
            && self.min.z < self.max.z
    }
}

/// A cell's momentary disposition, re-rolled once per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Resting: slowly restores energy.
    Calm,
    /// Low on energy: forages for food.
    Hungry,
    /// Restless: moves a lot and burns energy.
    Energetic,
    /// Wants to divide; does so only with enough energy and luck.
    Dividing,
    /// Dormant: restores more energy and slows down.
    Sleepy,
    /// Hunting on behalf of an aggressive organism.
    Predatory,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mood::Calm => "calm",
            Mood::Hungry => "hungry",
            Mood::Energetic => "energetic",
            Mood::Dividing => "dividing",
            Mood::Sleepy => "sleepy",
            Mood::Predatory => "predatory",
        };
        f.write_str(name)
    }
}

/// Differentiation tag of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Undifferentiated; its children may specialise.
    Stem,
    /// Sticky scaffolding: connects more readily.
    Structural,
    /// Locomotion: stronger mood impulses.
    Motive,
    /// Wider foraging reach.
    Sensory,
    /// Efficient metabolism: slower energy decay.
    Metabolic,
}

impl CellKind {
    /// The kinds a stem cell's child can differentiate into.
    pub const DIFFERENTIATED: [CellKind; 4] = [
        CellKind::Structural,
        CellKind::Motive,
        CellKind::Sensory,
        CellKind::Metabolic,
    ];

    /// Multiplier on daily energy decay.
    pub fn decay_factor(&self) -> f64 {
        match self {
            CellKind::Metabolic => 0.7,
            _ => 1.0,
        }
    }

    /// Multiplier on mood-driven velocity impulses.
    pub fn impulse_factor(&self) -> f64 {
        match self {
            CellKind::Motive => 1.5,
            _ => 1.0,
        }
    }

    /// Multiplier on the feeding radius.
    pub fn forage_factor(&self) -> f64 {
        match self {
            CellKind::Sensory => 1.5,
            _ => 1.0,
        }
    }

    /// Multiplier on connection chance.
    pub fn adhesion_factor(&self) -> f64 {
        match self {
            CellKind::Structural => 1.5,
            _ => 1.0,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Stem => "stem",
            CellKind::Structural => "structural",
            CellKind::Motive => "motive",
            CellKind::Sensory => "sensory",
            CellKind::Metabolic => "metabolic",
        };
        f.write_str(name)
    }
}

/// Why a cell died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Energy reached zero.
    Starvation,
    /// Age exceeded the cell's lifespan.
    OldAge,
    /// Drained by a predatory neighbor.
    Predation,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeathCause::Starvation => "starvation",
            DeathCause::OldAge => "old age",
            DeathCause::Predation => "predation",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_distance_and_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 4.0, 12.0);
        assert!((a.distance_to(&b) - 13.0).abs() < 1e-12);
        assert_eq!(a.midpoint(&b), Vec3::new(1.5, 2.0, 6.0));
    }

    #[test]
    fn clamp_length_preserves_direction() {
        let v = Vec3::new(30.0, 0.0, 40.0).clamp_length(5.0);
        assert!((v.length() - 5.0).abs() < 1e-12);
        assert!((v.x - 3.0).abs() < 1e-12);
        assert!((v.z - 4.0).abs() < 1e-12);

        let short = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(short.clamp_length(5.0), short);
    }

    #[test]
    fn bounds_distance_is_zero_inside() {
        let b = Bounds::centered(10.0, 10.0, 10.0);
        assert_eq!(b.distance_squared_to(&Vec3::new(1.0, -2.0, 3.0)), 0.0);
        assert!((b.distance_squared_to(&Vec3::new(13.0, 0.0, 0.0)) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_include_grows_box() {
        let mut b = Bounds::point(Vec3::ZERO);
        b.include(&Vec3::new(-1.0, 2.0, 5.0));
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(0.0, 2.0, 5.0));
    }

    #[test]
    fn ids_render_with_prefix() {
        assert_eq!(CellId(7).to_string(), "Cell#7");
        assert_eq!(OrganismId(3).to_string(), "Organism#3");
    }
}
