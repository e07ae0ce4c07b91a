use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Randomness seam for the engine. Production uses the thread RNG (or a
/// seeded one for reproducible rounds); tests substitute fixed sequences.
pub trait RandomSource {
    /// Uniform draw over the inclusive range `[min, max]`.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64;
    /// True with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        rand::rng().random_range(min..=max)
    }

    fn chance(&mut self, probability: f64) -> bool {
        rand::rng().random_bool(probability)
    }
}

/// Deterministic source for reproducing a reported round from its seed.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed override from the environment, e.g. `SEED=17 secret-number`.
    pub fn from_env() -> Option<Self> {
        std::env::var("SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Self::new)
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }
}

/// Test seam: replays scripted values, panicking if the script runs dry.
#[cfg(test)]
pub struct FixedRandom {
    ints: std::collections::VecDeque<i64>,
    chances: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl FixedRandom {
    pub fn with_ints(ints: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            chances: std::collections::VecDeque::new(),
        }
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances = chances.into_iter().collect();
        self
    }
}

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        let value = self.ints.pop_front().expect("FixedRandom ran out of ints");
        assert!(
            (min..=max).contains(&value),
            "scripted value {} outside [{}, {}]",
            value,
            min,
            max
        );
        value
    }

    fn chance(&mut self, _probability: f64) -> bool {
        // Unscripted chance rolls default to "no", keeping the easter egg
        // branch out of the way unless a test asks for it.
        self.chances.pop_front().unwrap_or(false)
    }
}
