//! Deterministic pseudo-random stream
//!
//! Every stochastic decision in the simulation draws from one `PseudoRandom`
//! owned by the engine and passed down explicitly. Same seed, same run.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable generator for uniform integers and floats
#[derive(Debug, Clone)]
pub struct PseudoRandom {
    rng: ChaCha8Rng,
}

impl PseudoRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw a seed from OS entropy for runs that don't pin one
    pub fn fresh_seed() -> u64 {
        rand::random()
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// Uniform integer in `[0, n)`; returns 0 when `n == 0`
    pub fn index_below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform float in `[0, 1)`
    pub fn uniform_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform_unit() < p
    }

    /// Uniform integer in `[lo, hi]`; returns `lo` if the range is inverted
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.index_below(items.len());
        items.get(idx)
    }
}
