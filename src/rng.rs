// Randomness seam: everything stochastic (palette, stamps, particle init,
// run length, dithering) draws through `RandomSource`.

use rand::Rng;
use rand::distributions::Standard;
use std::f64::consts::TAU;

pub trait RandomSource {
    /// Uniform sample in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Uniform angle in [0, 2π).
    fn next_angle(&mut self) -> f64 {
        self.next_unit() * TAU
    }

    /// Uniform sample in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_unit()
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }

    /// Uniform integer in `range`, truncating like the run-length draws do.
    fn next_in(&mut self, range: std::ops::Range<i64>) -> i64 {
        let span = (range.end - range.start) as f64;
        (range.start + (self.next_unit() * span) as i64).min(range.end - 1)
    }
}

/// Any `rand` generator is a random source; production binds `ThreadRng`.
impl<R: Rng> RandomSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.sample(Standard)
    }
}

/// Replays a fixed sequence of unit samples, cycling when exhausted.
#[cfg(test)]
pub struct SequenceRandom {
    values: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty());
        Self { values, pos: 0 }
    }
}

#[cfg(test)]
impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}
