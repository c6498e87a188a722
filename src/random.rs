//! Per-run random number generation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator every engine run owns.
pub type SearchRng = ChaCha8Rng;

/// Creates a generator from an optional seed.
///
/// `Some(seed)` gives a reproducible stream; `None` draws a fresh seed.
pub fn create_rng(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    }
}
