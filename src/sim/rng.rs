//! Injectable random source for spawn decisions
//!
//! The simulation never reaches for a global generator. Any `rand::Rng`
//! works (rounds use a seeded `Pcg32`); tests can script exact draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// The draws the spawn policy needs
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]` (inclusive)
    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32;
    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.random_range(lo..=hi)
    }

    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Round RNG seeded for reproducibility
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays fixed draws: integers are clamped into the requested range,
/// both sequences repeat once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: Vec<u32>,
    units: Vec<f32>,
    int_cursor: usize,
    unit_cursor: usize,
}

impl ScriptedRandom {
    pub fn new(ints: Vec<u32>, units: Vec<f32>) -> Self {
        Self {
            ints,
            units,
            int_cursor: 0,
            unit_cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if self.ints.is_empty() {
            return lo;
        }
        let v = self.ints[self.int_cursor % self.ints.len()];
        self.int_cursor += 1;
        v.clamp(lo, hi.max(lo))
    }

    fn unit(&mut self) -> f32 {
        if self.units.is_empty() {
            return 0.0;
        }
        let v = self.units[self.unit_cursor % self.units.len()];
        self.unit_cursor += 1;
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_draws_stay_in_range() {
        let mut rng = seeded(7);
        for _ in 0..1000 {
            let v = rng.int_inclusive(220, 340);
            assert!((220..=340).contains(&v));
            let u = RandomSource::unit(&mut rng);
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = seeded(7);
        assert_eq!(rng.int_inclusive(5, 5), 5);
        assert_eq!(rng.int_inclusive(9, 3), 9);
    }

    #[test]
    fn test_scripted_replays_and_clamps() {
        let mut rng = ScriptedRandom::new(vec![250, 10_000], vec![0.5]);
        assert_eq!(rng.int_inclusive(220, 340), 250);
        assert_eq!(rng.int_inclusive(220, 340), 340);
        assert_eq!(rng.int_inclusive(220, 340), 250);
        assert_eq!(rng.unit(), 0.5);
        assert_eq!(rng.unit(), 0.5);
    }
}
