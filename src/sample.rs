//! Sample data for demonstrations and tests.
//!
//! Randomness is always injected by the caller so runs can be reproduced with
//! a seeded `StdRng`.

use rand::Rng;

use crate::error::{PartitionError, Result};
use crate::item::Item;

/// Reference sample of 73 real-valued metrics.
pub const REFERENCE_METRICS: [f64; 73] = [
    29.875, 30.301, 30.57, 32.4, 32.76, 32.89, 33.21, 33.32, 33.47, 33.63, 34.09, 34.12, 34.66,
    34.73, 34.81, 35.4, 35.53, 35.95, 36.26, 36.33, 36.64, 36.76, 36.8, 36.9, 36.98, 37.29, 37.56,
    37.74, 37.94, 38.0, 38.49, 38.5, 38.77, 38.8, 39.8, 39.96, 40.11, 40.18, 40.2, 40.37, 40.66,
    40.7, 40.77, 40.82, 41.11, 41.5, 41.59, 42.15, 42.76, 42.81, 42.84, 43.25, 43.27, 44.44,
    45.15, 45.2, 45.31, 45.42, 45.71, 45.79, 46.427, 48.77, 48.78, 49.28, 49.51, 50.25, 50.33,
    52.22, 60.03, 60.95, 63.86, 64.19, 73.0,
];

/// The reference metrics as items tagged with their position.
pub fn reference_sample() -> Vec<Item> {
    REFERENCE_METRICS
        .iter()
        .enumerate()
        .map(|(index, &metric)| Item::with_index(metric, index))
        .collect()
}

/// Draw `len` items without replacement. Order follows the draw.
pub fn subsample<T: Clone, R: Rng + ?Sized>(items: &[T], len: usize, rng: &mut R) -> Result<Vec<T>> {
    if len > items.len() {
        return Err(PartitionError::invalid_argument(format!(
            "cannot draw {len} items from a pool of {}",
            items.len()
        )));
    }
    let mut pool = items.to_vec();
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0..pool.len());
        out.push(pool.remove(idx));
    }
    Ok(out)
}

/// `len` items with metrics uniform in `[min, max)`, rounded to six decimals.
pub fn random_sample<R: Rng + ?Sized>(len: usize, min: f64, max: f64, rng: &mut R) -> Result<Vec<Item>> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(PartitionError::invalid_argument(format!(
            "sample range must be finite with min < max, got [{min}, {max})"
        )));
    }
    Ok((0..len)
        .map(|index| {
            let metric = (rng.gen_range(min..max) * 1e6).round() / 1e6;
            Item::with_index(metric, index)
        })
        .collect())
}
