//! Seedable random source threaded through generation and timeline setup

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random source for one sketch session.
///
/// Every sampler tolerates degenerate ranges (`min >= max`, non-finite bounds)
/// by returning the lower bound, so bad configuration never panics.
#[derive(Debug, Clone)]
pub struct SketchRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SketchRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[min, max)`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return if min.is_finite() { min } else { 0.0 };
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform float in `[-amount, amount)`
    pub fn jitter(&mut self, amount: f32) -> f32 {
        let amount = amount.abs();
        self.range(-amount, amount)
    }

    /// Uniform integer in `[min, max)`
    pub fn range_usize(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// True with probability `p` (clamped to [0, 1])
    pub fn chance(&mut self, p: f32) -> bool {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        self.rng.gen_bool(p as f64)
    }

    /// Index drawn proportionally to `weights`. Non-positive weights never win;
    /// if nothing has weight, falls back to a uniform pick. Empty input yields None.
    pub fn pick_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f32 = weights
            .iter()
            .filter(|w| w.is_finite() && **w > 0.0)
            .sum();
        if total <= 0.0 {
            return Some(self.range_usize(0, weights.len()));
        }

        let mut target = self.range(0.0, total);
        let mut last_valid = 0;
        for (i, &w) in weights.iter().enumerate() {
            if !(w.is_finite() && w > 0.0) {
                continue;
            }
            if target < w {
                return Some(i);
            }
            target -= w;
            last_valid = i;
        }
        // Float drift left a sliver past the last bucket
        Some(last_valid)
    }

    /// Fresh 64-bit value for seeding a child source
    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}
