use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable uniform random source owned by a single fill model.
///
/// Not `Clone`: two models must never draw from the same sequence unless
/// they were explicitly given the same seed.
#[derive(Debug)]
pub struct DecisionSource {
    rng: StdRng,
}

impl DecisionSource {
    /// With `Some(seed)` the draw sequence is reproducible; with `None` it is
    /// seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: Self::make_rng(seed),
        }
    }

    /// Reinitialize the generator, discarding its current state.
    pub fn seed(&mut self, seed: Option<u64>) {
        self.rng = Self::make_rng(seed);
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
