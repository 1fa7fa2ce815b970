//! Injectable randomness
//!
//! Engines never touch an ambient RNG. They draw from a `RandomSource`,
//! which is a seeded PCG in play and a scripted sequence in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform random values for serves and food placement
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32 {
        let v = (self.next_unit() * bound as f32) as u32;
        v.min(bound.saturating_sub(1))
    }

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.next_unit() < 0.5
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }

    fn coin(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }
}

/// Seeded PCG for reproducible runs
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of unit values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values are clamped into `[0, 1)`. An empty script always yields 0.
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Values handed out so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
