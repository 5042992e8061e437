use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::spatial::tiles::Orientation;

/// Seeded random source for reproducible stochastic choices
///
/// Every random decision in generation goes through one selector, so a fixed
/// seed reproduces placements, direction choices and retries exactly.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from operating-system entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Fair coin flip
    pub fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Uniformly chosen orientation
    pub fn orientation(&mut self) -> Orientation {
        if self.coin_flip() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Draw a seed for an independent child selector
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}
