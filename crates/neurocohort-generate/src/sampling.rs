//! Column-wise sampling primitives.
//!
//! Every sampler draws a full column of `rows` values from the caller's
//! stream, so the order in which the engine calls them fixes the output.

use rand::Rng;
use rand::distr::Bernoulli;
use rand::distr::weighted::WeightedIndex;
use rand_distr::{Distribution, LogNormal, Normal, Poisson};

use neurocohort_core::Bounds;

use crate::errors::GenerationError;

/// Continuous distribution of a feature before clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Continuous {
    Normal { mean: f64, std_dev: f64 },
    /// `mu` and `sigma` describe the underlying normal.
    LogNormal { mu: f64, sigma: f64 },
}

pub fn sample_continuous<R: Rng + ?Sized>(
    rng: &mut R,
    dist: Continuous,
    rows: usize,
) -> Result<Vec<f64>, GenerationError> {
    match dist {
        Continuous::Normal { mean, std_dev } => {
            if std_dev < 0.0 {
                return Err(GenerationError::InvalidModel(format!(
                    "normal({mean}, {std_dev}): standard deviation must not be negative"
                )));
            }
            let normal = Normal::new(mean, std_dev).map_err(|err| {
                GenerationError::InvalidModel(format!("normal({mean}, {std_dev}): {err}"))
            })?;
            Ok(normal.sample_iter(rng).take(rows).collect())
        }
        Continuous::LogNormal { mu, sigma } => {
            if sigma < 0.0 {
                return Err(GenerationError::InvalidModel(format!(
                    "lognormal({mu}, {sigma}): sigma must not be negative"
                )));
            }
            let lognormal = LogNormal::new(mu, sigma).map_err(|err| {
                GenerationError::InvalidModel(format!("lognormal({mu}, {sigma}): {err}"))
            })?;
            Ok(lognormal.sample_iter(rng).take(rows).collect())
        }
    }
}

/// Poisson counts clipped into `bounds`.
pub fn sample_counts<R: Rng + ?Sized>(
    rng: &mut R,
    lambda: f64,
    bounds: Bounds,
    rows: usize,
) -> Result<Vec<i64>, GenerationError> {
    let poisson = Poisson::new(lambda)
        .map_err(|err| GenerationError::InvalidModel(format!("poisson({lambda}): {err}")))?;
    Ok(poisson
        .sample_iter(rng)
        .take(rows)
        .map(|count: f64| bounds.clip(count) as i64)
        .collect())
}

/// Independent Bernoulli trials.
pub fn sample_flags<R: Rng + ?Sized>(
    rng: &mut R,
    probability: f64,
    rows: usize,
) -> Result<Vec<bool>, GenerationError> {
    let bernoulli = Bernoulli::new(probability).map_err(|err| {
        GenerationError::InvalidModel(format!("bernoulli({probability}): {err}"))
    })?;
    Ok(bernoulli.sample_iter(rng).take(rows).collect())
}

/// Uniform draws on `[0, 1)`.
pub fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, rows: usize) -> Vec<f64> {
    (0..rows).map(|_| rng.random::<f64>()).collect()
}

/// Categorical draws from a label -> probability table.
pub fn sample_category<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[(T, f64)],
    rows: usize,
) -> Result<Vec<T>, GenerationError> {
    let index = WeightedIndex::new(weights.iter().map(|(_, weight)| *weight))
        .map_err(|err| GenerationError::InvalidModel(format!("categorical weights: {err}")))?;
    Ok(index
        .sample_iter(rng)
        .take(rows)
        .map(|choice| weights[choice].0)
        .collect())
}

/// Pick from `when_set` where the mask holds, from `otherwise` elsewhere.
pub fn select_by_mask<T: Copy>(mask: &[bool], when_set: &[T], otherwise: &[T]) -> Vec<T> {
    mask.iter()
        .zip(when_set.iter().zip(otherwise))
        .map(|(set, (a, b))| if *set { *a } else { *b })
        .collect()
}

/// Round half to even at `scale` decimal places.
pub fn round_to(value: f64, scale: usize) -> f64 {
    let factor = 10_f64.powi(scale as i32);
    (value * factor).round_ties_even() / factor
}

/// Clip then round to a whole number.
pub fn clip_to_int(value: f64, bounds: Bounds) -> i64 {
    bounds.clip(value).round_ties_even() as i64
}
