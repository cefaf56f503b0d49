use std::ops::Range;

use rand::distr::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Error, Result};

/// Generates `count` samples drawn uniformly from `range` (inclusive start, exclusive end).
///
/// The random source is a ChaCha8 stream seeded with `seed`, so the same parameters always
/// produce the same sequence, on every target. This keeps the input identical for every
/// strategy measured at a given size and comparable between hosts.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if the range is empty or not finite.
///
/// # Examples
///
/// ```
/// let samples = transform_bench::generate(4, 42, 0.0..1.0).unwrap();
///
/// assert_eq!(samples.len(), 4);
/// assert!(samples.iter().all(|x| (0.0..1.0).contains(x)));
/// ```
pub fn generate(count: usize, seed: u64, range: Range<f64>) -> Result<Vec<f64>> {
    let Range { start, end } = range;

    let distribution = Uniform::new(start, end).map_err(|e| Error::InvalidRange {
        start,
        end,
        problem: e.to_string(),
    })?;

    Ok(ChaCha8Rng::seed_from_u64(seed)
        .sample_iter(distribution)
        .take(count)
        .collect())
}
