//! Randomness source.
//!
//! Every stochastic decision in the engine (mood rolls, division, hormone
//! drift, connection attempts, spawn placement) draws from an [`Entropy`].
//! Production code uses [`SeededEntropy`], a seeded ChaCha stream, so a
//! run is reproducible from its seed. Tests script exact draw sequences
//! with [`ScriptedEntropy`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::collections::VecDeque;

/// A stream of uniform draws in `[0, 1)`.
///
/// Only [`Entropy::next_f64`] is required; the helpers are all expressed
/// in terms of it so scripted and seeded sources consume draws identically.
pub trait Entropy: Send {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform in `[-span/2, span/2)`.
    fn centered(&mut self, span: f64) -> f64 {
        (self.next_f64() - 0.5) * span
    }

    /// Uniform in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index in `0..n`. Returns 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }
}

/// Deterministic entropy from a 64-bit seed.
pub struct SeededEntropy {
    seed: u64,
    rng: ChaCha12Rng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Seed from the OS. The chosen seed is still available via [`seed`](Self::seed)
    /// so the run can be replayed.
    pub fn from_os() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Entropy for SeededEntropy {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, then a constant fallback.
#[derive(Debug, Clone)]
pub struct ScriptedEntropy {
    script: VecDeque<f64>,
    fallback: f64,
    drawn: usize,
}

impl ScriptedEntropy {
    /// Replay `draws` in order, then return 0.5 forever.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: draws.into_iter().collect(),
            fallback: 0.5,
            drawn: 0,
        }
    }

    /// Always return `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([]).with_fallback(value)
    }

    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = value;
        self
    }

    /// Queue more draws behind the ones still pending.
    pub fn push(&mut self, draws: impl IntoIterator<Item = f64>) {
        self.script.extend(draws);
    }

    /// Number of draws consumed so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Entropy for ScriptedEntropy {
    fn next_f64(&mut self) -> f64 {
        self.drawn += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

/// Fisher-Yates shuffle driven by an [`Entropy`].
pub fn shuffle<T>(items: &mut [T], entropy: &mut dyn Entropy) {
    for i in (1..items.len()).rev() {
        let j = entropy.below(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededEntropy::new(42);
        let mut b = SeededEntropy::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededEntropy::new(1);
        let mut b = SeededEntropy::new(2);
        let same = (0..20).filter(|_| a.next_f64() == b.next_f64()).count();
        assert!(same < 20);
    }

    #[test]
    fn seeded_draws_stay_in_unit_interval() {
        let mut e = SeededEntropy::new(7);
        for _ in 0..1000 {
            let v = e.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn scripted_replays_then_falls_back() {
        let mut e = ScriptedEntropy::new([0.1, 0.9]).with_fallback(0.25);
        assert_eq!(e.next_f64(), 0.1);
        assert_eq!(e.next_f64(), 0.9);
        assert_eq!(e.next_f64(), 0.25);
        assert_eq!(e.drawn(), 3);
        assert_eq!(e.remaining(), 0);
    }

    #[test]
    fn helpers_map_draws() {
        let mut e = ScriptedEntropy::new([0.0, 0.75, 0.5, 0.999, 0.2]);
        assert_eq!(e.centered(10.0), -5.0);
        assert_eq!(e.range(10.0, 20.0), 17.5);
        assert!(!e.chance(0.5));
        assert_eq!(e.below(4), 3);
        assert!(e.chance(0.3));
    }

    #[test]
    fn below_zero_is_zero() {
        let mut e = ScriptedEntropy::constant(0.7);
        assert_eq!(e.below(0), 0);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..10).collect();
        let mut e = SeededEntropy::new(3);
        shuffle(&mut items, &mut e);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }
}
