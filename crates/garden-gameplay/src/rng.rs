//! Injectable random source.
//!
//! Pest spawn coordinates and pest steps are the only random draws in a session.
//! Production code uses a seeded [`fastrand::Rng`]; tests script the draws with
//! [`SequenceRandom`].

use serde::{Deserialize, Serialize};

/// Source of uniform random integers.
pub trait RandomSource {
    /// Uniform draw from `0..upper`. Returns 0 when `upper` is 0.
    fn below(&mut self, upper: u32) -> u32;
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.u32(..upper)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, upper: u32) -> u32 {
        (**self).below(upper)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRandom {
    /// Create a source that replays `values` in order.
    #[must_use]
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 || self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}
