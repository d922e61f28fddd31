//! Seeded random streams and weighted sampling.
//!
//! Every stochastic step in the crate draws from a [`ChaCha8Rng`]. Work that
//! may run in parallel (one mutation per population row) gets its own
//! stream derived from a shared seed, so results never depend on the order
//! in which rayon schedules the rows.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use u_numflow::random::weighted_choose;

/// The RNG type used across the crate.
pub type BicommRng = ChaCha8Rng;

/// Creates a seeded RNG.
pub fn create_rng(seed: u64) -> BicommRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a seeded RNG, or an entropy-seeded one when `seed` is `None`.
pub fn create_rng_opt(seed: Option<u64>) -> BicommRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}

/// Creates the independent stream `stream` of the generator seeded by `seed`.
///
/// Streams with different ids never overlap, which makes them suitable for
/// per-row work units.
pub fn stream_rng(seed: u64, stream: u64) -> BicommRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Samples an index with probability proportional to `weights[i]`.
///
/// Cumulative walk over the positive weights via
/// [`u_numflow::random::weighted_choose`]. When no weight is positive the
/// choice is uniform.
///
/// # Panics
/// Panics if `weights` is empty.
pub fn weighted_choice<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "cannot sample from empty weights");
    match weighted_choose(weights, rng) {
        Some(i) => i,
        None => rng.random_range(0..weights.len()),
    }
}
