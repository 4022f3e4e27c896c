//! Substrate adhesion field.
//!
//! A coarse grid laid over the world bounds. Each grid cell holds an
//! adhesion value in `[0, 1]` that scales the chance of two nearby cells
//! connecting. Values are random with a smooth sinusoidal ripple so the
//! field has sticky and slippery regions.

use protocell_core::config::SubstrateConfig;
use protocell_core::entropy::Entropy;
use protocell_core::types::{Bounds, Vec3};

#[derive(Debug, Clone)]
pub struct AdhesionField {
    bounds: Bounds,
    resolution: [usize; 3],
    /// Row-major: x fastest, then y, then z. Empty when uniform.
    values: Vec<f64>,
}

impl AdhesionField {
    /// Adhesion 1.0 everywhere.
    pub fn uniform(bounds: Bounds) -> Self {
        Self {
            bounds,
            resolution: [1, 1, 1],
            values: Vec::new(),
        }
    }

    pub fn generate(bounds: Bounds, config: &SubstrateConfig, rng: &mut dyn Entropy) -> Self {
        if !config.enabled {
            return Self::uniform(bounds);
        }
        let [nx, ny, nz] = config.resolution.map(|n| n.max(1));
        let mut values = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for _j in 0..ny {
                for i in 0..nx {
                    let ripple = (0.3 * i as f64).sin() + (0.2 * k as f64).cos();
                    let v = config.base_min + config.base_span * rng.next_f64() + config.ripple * ripple;
                    values.push(v.clamp(0.0, 1.0));
                }
            }
        }
        Self {
            bounds,
            resolution: [nx, ny, nz],
            values,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.values.is_empty()
    }

    /// Adhesion at `p`. Points outside the bounds read the nearest edge cell.
    pub fn sample(&self, p: &Vec3) -> f64 {
        if self.values.is_empty() {
            return 1.0;
        }
        let [nx, ny, nz] = self.resolution;
        let i = grid_index(p.x, self.bounds.min.x, self.bounds.max.x, nx);
        let j = grid_index(p.y, self.bounds.min.y, self.bounds.max.y, ny);
        let k = grid_index(p.z, self.bounds.min.z, self.bounds.max.z, nz);
        self.values[(k * ny + j) * nx + i]
    }

    /// Mean adhesion over the whole grid.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 1.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

fn grid_index(v: f64, min: f64, max: f64, n: usize) -> usize {
    let t = ((v - min) / (max - min)).clamp(0.0, 1.0);
    ((t * n as f64) as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocell_core::entropy::{ScriptedEntropy, SeededEntropy};

    fn bounds() -> Bounds {
        Bounds::centered(420.0, 200.0, 420.0)
    }

    #[test]
    fn disabled_substrate_is_uniform() {
        let config = SubstrateConfig {
            enabled: false,
            ..SubstrateConfig::default()
        };
        let field = AdhesionField::generate(bounds(), &config, &mut SeededEntropy::new(1));
        assert!(field.is_uniform());
        assert_eq!(field.sample(&Vec3::new(10.0, 0.0, -50.0)), 1.0);
    }

    #[test]
    fn values_are_clamped_to_unit_interval() {
        let field = AdhesionField::generate(
            bounds(),
            &SubstrateConfig::default(),
            &mut SeededEntropy::new(3),
        );
        for x in [-500.0, -420.0, -100.0, 0.0, 100.0, 419.9, 420.0, 900.0] {
            for z in [-420.0, 0.0, 420.0] {
                let v = field.sample(&Vec3::new(x, 0.0, z));
                assert!((0.0..=1.0).contains(&v));
            }
        }
        let mean = field.mean();
        assert!(mean > 0.3 && mean < 0.7, "mean {mean}");
    }

    #[test]
    fn ripple_follows_grid_position() {
        let config = SubstrateConfig {
            resolution: [4, 1, 1],
            ..SubstrateConfig::default()
        };
        // zero random component leaves base + ripple
        let field = AdhesionField::generate(bounds(), &config, &mut ScriptedEntropy::constant(0.0));
        let first = field.sample(&Vec3::new(-419.0, 0.0, 0.0));
        assert!((first - (0.2 + 0.05 * 1.0)).abs() < 1e-12);
        let second = field.sample(&Vec3::new(-200.0, 0.0, 0.0));
        assert!((second - (0.2 + 0.05 * (0.3f64.sin() + 1.0))).abs() < 1e-12);
    }
}
