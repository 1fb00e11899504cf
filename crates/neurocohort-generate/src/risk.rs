//! Logistic readmission model.

/// Coefficients of the readmission logit.
///
/// Continuous predictors enter as population z-scores, flags enter raw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    pub intercept: f64,
    pub age: f64,
    pub prior_admits: f64,
    pub los_days: f64,
    pub creatinine: f64,
    pub hemoglobin: f64,
    pub wbc: f64,
    pub glucose: f64,
    pub sodium: f64,
    pub num_diagnoses: f64,
    pub cerebral_infarction: f64,
    pub ich: f64,
    pub chf: f64,
    pub ckd: f64,
    pub diabetes: f64,
    pub copd: f64,
    pub had_icu_stay: f64,
    pub num_medications: f64,
    /// z(prior_admits) * ckd
    pub prior_admits_x_ckd: f64,
    /// z(age) * z(creatinine)
    pub age_x_creatinine: f64,
    pub noise_std_dev: f64,
}

/// Predictor columns, all of length N, taken before any value is blanked.
#[derive(Debug, Clone, Copy)]
pub struct RiskInputs<'a> {
    pub age: &'a [f64],
    pub prior_admits: &'a [f64],
    pub los_days: &'a [f64],
    pub creatinine: &'a [f64],
    pub hemoglobin: &'a [f64],
    pub wbc: &'a [f64],
    pub glucose: &'a [f64],
    pub sodium: &'a [f64],
    pub num_diagnoses: &'a [f64],
    pub num_medications: &'a [f64],
    pub cerebral_infarction: &'a [bool],
    pub ich: &'a [bool],
    pub chf: &'a [bool],
    pub ckd: &'a [bool],
    pub diabetes: &'a [bool],
    pub copd: &'a [bool],
    pub had_icu_stay: &'a [bool],
}

/// Population z-scores (variance divides by N).
///
/// A constant column has no spread to scale by and maps to zeros.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 || !std_dev.is_finite() {
        return vec![0.0; values.len()];
    }
    values.iter().map(|value| (value - mean) / std_dev).collect()
}

pub fn logistic(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

/// Per-row logit; `noise` holds the Gaussian error term already scaled.
pub fn readmission_logit(inputs: &RiskInputs<'_>, weights: &RiskWeights, noise: &[f64]) -> Vec<f64> {
    let age = standardize(inputs.age);
    let prior_admits = standardize(inputs.prior_admits);
    let los_days = standardize(inputs.los_days);
    let creatinine = standardize(inputs.creatinine);
    let hemoglobin = standardize(inputs.hemoglobin);
    let wbc = standardize(inputs.wbc);
    let glucose = standardize(inputs.glucose);
    let sodium = standardize(inputs.sodium);
    let num_diagnoses = standardize(inputs.num_diagnoses);
    let num_medications = standardize(inputs.num_medications);
    let flag = |values: &[bool], row: usize| if values[row] { 1.0 } else { 0.0 };

    (0..noise.len())
        .map(|row| {
            let ckd = flag(inputs.ckd, row);
            weights.intercept
                + weights.age * age[row]
                + weights.prior_admits * prior_admits[row]
                + weights.los_days * los_days[row]
                + weights.creatinine * creatinine[row]
                + weights.hemoglobin * hemoglobin[row]
                + weights.wbc * wbc[row]
                + weights.glucose * glucose[row]
                + weights.sodium * sodium[row]
                + weights.num_diagnoses * num_diagnoses[row]
                + weights.cerebral_infarction * flag(inputs.cerebral_infarction, row)
                + weights.ich * flag(inputs.ich, row)
                + weights.chf * flag(inputs.chf, row)
                + weights.ckd * ckd
                + weights.diabetes * flag(inputs.diabetes, row)
                + weights.copd * flag(inputs.copd, row)
                + weights.had_icu_stay * flag(inputs.had_icu_stay, row)
                + weights.num_medications * num_medications[row]
                + weights.prior_admits_x_ckd * prior_admits[row] * ckd
                + weights.age_x_creatinine * age[row] * creatinine[row]
                + noise[row]
        })
        .collect()
}
