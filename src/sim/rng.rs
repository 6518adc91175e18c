//! Random draws used by world generation
//!
//! Generation code only talks to `RandomSource`, so tests can swap the PCG
//! stream for a scripted sequence of draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Primitive draws consumed by terrain and hazard generation
///
/// Only `next_f32` is required; the other draws are derived from it unless an
/// implementation has something better.
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Uniform float in [lo, hi)
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform integer in [lo, hi] (inclusive)
    fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f32;
        let offset = (self.next_f32() * span) as i32;
        lo + offset.min(hi - lo)
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Either -1 or +1 with equal odds
    fn direction(&mut self) -> i8 {
        if self.next_f32() < 0.5 { -1 } else { 1 }
    }

    /// Inverse-CDF pick over non-negative weights; returns an index into `weights`
    fn weighted_index(&mut self, weights: &[f32]) -> usize {
        let total: f32 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return 0;
        }
        let roll = self.next_f32() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        // Rounding can leave the roll a hair above the last boundary
        weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
    }

    /// `amount` distinct indices from [0, length), in draw order
    fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(length);
        let mut pool: Vec<usize> = (0..length).collect();
        for i in 0..amount {
            let j = self.range_i32(i as i32, length as i32 - 1) as usize;
            pool.swap(i, j);
        }
        pool.truncate(amount);
        pool
    }
}

/// PCG-backed source used by real sessions
#[derive(Debug, Clone)]
pub struct PcgSource {
    seed: u64,
    rng: Pcg32,
}

impl PcgSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fresh source from an OS-random seed
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for PcgSource {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }
}

/// Replays a fixed list of `next_f32` values, cycling when exhausted
///
/// An empty list always draws 0.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Source that always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedSource {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_pcg_repeats() {
        let mut a = PcgSource::seeded(99);
        let mut b = PcgSource::seeded(99);
        for _ in 0..32 {
            assert_eq!(a.next_f32(), b.next_f32());
            assert_eq!(a.range_i32(-3, 3), b.range_i32(-3, 3));
        }
    }

    #[test]
    fn test_range_i32_bounds() {
        let mut rng = PcgSource::seeded(1);
        for _ in 0..500 {
            let v = rng.range_i32(1, 3);
            assert!((1..=3).contains(&v));
        }
        assert_eq!(rng.range_i32(5, 5), 5);

        // Scripted extremes land on the ends of the range
        assert_eq!(ScriptedSource::constant(0.0).range_i32(1, 2), 1);
        assert_eq!(ScriptedSource::constant(0.999).range_i32(1, 2), 2);
    }

    #[test]
    fn test_weighted_index_inverse_cdf() {
        let weights = [0.5, 0.3, 0.2, 0.0];
        assert_eq!(ScriptedSource::constant(0.1).weighted_index(&weights), 0);
        assert_eq!(ScriptedSource::constant(0.6).weighted_index(&weights), 1);
        assert_eq!(ScriptedSource::constant(0.95).weighted_index(&weights), 2);
        // Zero-weight tail is never picked
        assert_eq!(ScriptedSource::constant(0.999_999).weighted_index(&weights), 2);
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = PcgSource::seeded(7);
        let picks = rng.sample_distinct(20, 4);
        assert_eq!(picks.len(), 4);
        let mut sorted = picks.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
        assert!(picks.iter().all(|&i| i < 20));

        let mut scripted = ScriptedSource::new(vec![0.0, 0.5, 0.9]);
        let picks = scripted.sample_distinct(5, 9);
        assert_eq!(picks.len(), 5);
    }

    #[test]
    fn test_scripted_cycles() {
        let mut rng = ScriptedSource::new(vec![0.25, 0.75]);
        assert_eq!(rng.next_f32(), 0.25);
        assert_eq!(rng.next_f32(), 0.75);
        assert_eq!(rng.next_f32(), 0.25);
        assert_eq!(ScriptedSource::constant(0.2).direction(), -1);
        assert_eq!(ScriptedSource::constant(0.7).direction(), 1);
    }

    #[test]
    fn test_empty_script_draws_zero() {
        let mut rng = ScriptedSource::new(Vec::new());
        assert_eq!(rng.next_f32(), 0.0);
        assert_eq!(rng.range_i32(2, 5), 2);
        assert_eq!(rng.direction(), -1);
    }
}
