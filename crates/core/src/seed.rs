//! Seed selection for a single try-on invocation.

use rand::Rng;

use crate::types::{Seed, MAX_SEED};

/// Pick the seed to submit.
///
/// With `randomize` set, a fresh seed is drawn uniformly from
/// `0..=MAX_SEED`; otherwise the caller's seed is used verbatim.
pub fn resolve_seed(seed: Seed, randomize: bool) -> Seed {
    if randomize {
        random_seed()
    } else {
        seed
    }
}

/// Draw a uniformly distributed seed in `0..=MAX_SEED`.
pub fn random_seed() -> Seed {
    rand::rng().random_range(0..=MAX_SEED)
}
