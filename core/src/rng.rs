//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through one GenRng seeded from the
//! configured seed, passed explicitly into every sampling function.
//!
//! Draw order is part of the output contract: the profile sampler
//! consumes the stream first, then the transaction synthesizer.
//! Reordering any draw changes every byte after it.

use crate::segment::Bounds;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct GenRng {
    inner: Pcg64Mcg,
}

impl GenRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform draw in [bounds.min, bounds.max], both ends included.
    pub fn in_bounds(&mut self, bounds: Bounds) -> u64 {
        let span = bounds.max - bounds.min;
        match span.checked_add(1) {
            Some(width) => bounds.min + self.below(width),
            None => self.inner.next_u64(),
        }
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick an index with probability proportional to its weight.
    /// Weights are expected to sum to 1.0; any rounding slack lands
    /// on the last index with a positive weight, so a zero weight is
    /// never returned.
    pub fn pick_weighted(&mut self, weights: &[f64]) -> usize {
        let roll = self.next_f64();
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if *w > 0.0 && roll < cumulative {
                return i;
            }
        }
        weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
    }
}
