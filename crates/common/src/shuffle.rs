//! Participant shuffling
//!
//! The draw's only source of randomness. The random source is handed in
//! explicitly so tests can substitute a fixed-seed generator; the default
//! is seeded once from the wall clock and is not meant to be cryptographically
//! secure. It only decides pairing order, never key material.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::participant::Participant;

/// Shuffles participant lists with an owned random source
#[derive(Debug, Clone)]
pub struct Randomizer<R = StdRng> {
    rng: R,
}

impl Randomizer<StdRng> {
    /// Seed a generator from the current high-resolution clock reading.
    ///
    /// Two invocations of the tool never share a seed in practice, and the
    /// seed is not recorded anywhere, so draws cannot be replayed.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(StdRng::seed_from_u64(nanos))
    }

    /// Deterministic generator, for tests and reproducible demos
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Randomizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Return a uniformly shuffled copy of `participants`.
    pub fn shuffle(&mut self, participants: &[Participant]) -> Vec<Participant> {
        let mut order = participants.to_vec();
        order.shuffle(&mut self.rng);
        order
    }

    /// Draw a rotation offset in `1..n`, or `None` when `n < 2`.
    pub fn offset(&mut self, n: usize) -> Option<usize> {
        (n >= 2).then(|| self.rng.gen_range(1..n))
    }
}
