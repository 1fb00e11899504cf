//! Missing-data injection.

use rand::Rng;
use rand::seq::index;

use crate::errors::GenerationError;

/// Rows blanked by a rule of `percent` over `rows` admissions.
pub fn missing_count(rows: usize, percent: f64) -> usize {
    (rows as f64 * percent / 100.0) as usize
}

/// MCAR mask: exactly [`missing_count`] rows chosen without replacement.
pub fn mcar_mask<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    percent: f64,
) -> Result<Vec<bool>, GenerationError> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(GenerationError::InvalidModel(format!(
            "missing percent {percent} must be between 0 and 100"
        )));
    }
    let mut mask = vec![false; rows];
    for row in index::sample(rng, rows, missing_count(rows, percent)) {
        mask[row] = true;
    }
    Ok(mask)
}

/// MAR mask: rows where `eligible` holds and a uniform draw falls under
/// `probability`. One draw is consumed per row either way.
pub fn mar_mask<R: Rng + ?Sized>(
    rng: &mut R,
    eligible: &[bool],
    probability: f64,
) -> Result<Vec<bool>, GenerationError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GenerationError::InvalidModel(format!(
            "missing probability {probability} must be between 0 and 1"
        )));
    }
    Ok(eligible
        .iter()
        .map(|eligible| {
            let draw = rng.random::<f64>();
            *eligible && draw < probability
        })
        .collect())
}

/// Element-wise OR of two masks.
pub fn union(base: &[bool], extra: &[bool]) -> Vec<bool> {
    base.iter().zip(extra).map(|(a, b)| *a || *b).collect()
}

/// Blank the values selected by `mask`.
pub fn apply_mask<T: Copy>(values: &[T], mask: &[bool]) -> Vec<Option<T>> {
    values
        .iter()
        .zip(mask)
        .map(|(value, missing)| if *missing { None } else { Some(*value) })
        .collect()
}
