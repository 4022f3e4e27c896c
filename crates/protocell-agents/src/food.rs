//! Food patches: stationary energy sources for hungry cells.

use protocell_core::config::FoodConfig;
use protocell_core::entropy::Entropy;
use protocell_core::types::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FoodPatch {
    pub id: FoodId,
    pub position: Vec3,
    amount: f64,
    capacity: f64,
}

impl FoodPatch {
    pub fn new(id: FoodId, position: Vec3, capacity: f64) -> Self {
        let capacity = capacity.max(0.0);
        Self {
            id,
            position,
            amount: capacity,
            capacity,
        }
    }

    /// A full patch at a uniformly random point inside `bounds`.
    pub fn spawn(id: FoodId, bounds: &Bounds, config: &FoodConfig, rng: &mut dyn Entropy) -> Self {
        let position = Vec3::new(
            rng.range(bounds.min.x, bounds.max.x),
            rng.range(bounds.min.y, bounds.max.y),
            rng.range(bounds.min.z, bounds.max.z),
        );
        Self::new(id, position, rng.range(config.amount_min, config.amount_max))
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn is_exhausted(&self) -> bool {
        self.amount <= 0.0
    }

    /// Take up to `wanted`. Returns what was actually taken.
    pub fn consume(&mut self, wanted: f64) -> f64 {
        let taken = wanted.max(0.0).min(self.amount);
        self.amount -= taken;
        taken
    }

    /// Regrow by `amount`, never past capacity.
    pub fn regenerate(&mut self, amount: f64) {
        self.amount = (self.amount + amount.max(0.0)).min(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocell_core::entropy::SeededEntropy;

    #[test]
    fn consume_is_capped_by_amount() {
        let mut patch = FoodPatch::new(FoodId(1), Vec3::ZERO, 20.0);
        assert_eq!(patch.consume(18.0), 18.0);
        assert_eq!(patch.consume(18.0), 2.0);
        assert!(patch.is_exhausted());
        assert_eq!(patch.consume(5.0), 0.0);
    }

    #[test]
    fn regeneration_stops_at_capacity() {
        let mut patch = FoodPatch::new(FoodId(1), Vec3::ZERO, 100.0);
        patch.consume(10.0);
        patch.regenerate(6.0);
        assert_eq!(patch.amount(), 96.0);
        patch.regenerate(6.0);
        assert_eq!(patch.amount(), 100.0);
    }

    #[test]
    fn spawned_patches_lie_inside_bounds() {
        let bounds = Bounds::centered(420.0, 200.0, 420.0);
        let config = FoodConfig::default();
        let mut rng = SeededEntropy::new(5);
        for i in 0..50 {
            let patch = FoodPatch::spawn(FoodId(i), &bounds, &config, &mut rng);
            assert!(bounds.contains(&patch.position));
            assert!(patch.capacity() >= 80.0 && patch.capacity() < 240.0);
            assert_eq!(patch.amount(), patch.capacity());
        }
    }
}
