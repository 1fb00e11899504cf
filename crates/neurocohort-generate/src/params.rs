//! Hand-tuned parameters of the cohort model.
//!
//! Distributions follow published summary statistics for neurological
//! admissions in MIMIC-IV and the 30-day readmission literature. Clip ranges
//! for output columns come from the core catalog; the ranges below only cover
//! draws whose bounds differ from their column's.

use neurocohort_core::{AdmissionType, Bounds, Gender, Insurance, MaritalStatus, Race};

use crate::risk::RiskWeights;
use crate::sampling::Continuous;

pub const DEFAULT_ROWS: usize = 2400;
pub const DEFAULT_SEED: u64 = 2025;

pub const GENDER_WEIGHTS: &[(Gender, f64)] = &[(Gender::Male, 0.53), (Gender::Female, 0.47)];

pub const RACE_WEIGHTS: &[(Race, f64)] = &[
    (Race::White, 0.58),
    (Race::Black, 0.16),
    (Race::Hispanic, 0.08),
    (Race::Asian, 0.05),
    (Race::Other, 0.08),
    (Race::Unknown, 0.05),
];

pub const INSURANCE_WEIGHTS: &[(Insurance, f64)] = &[
    (Insurance::Medicare, 0.55),
    (Insurance::Medicaid, 0.18),
    (Insurance::Other, 0.27),
];

pub const MARITAL_STATUS_WEIGHTS: &[(MaritalStatus, f64)] = &[
    (MaritalStatus::Married, 0.38),
    (MaritalStatus::Single, 0.25),
    (MaritalStatus::Divorced, 0.10),
    (MaritalStatus::Widowed, 0.17),
    (MaritalStatus::Unknown, 0.10),
];

pub const ADMISSION_TYPE_WEIGHTS: &[(AdmissionType, f64)] = &[
    (AdmissionType::Urgent, 0.35),
    (AdmissionType::Emergency, 0.55),
    (AdmissionType::Observation, 0.10),
];

/// Skewed older than the general ICU population.
pub const AGE: Continuous = Continuous::Normal {
    mean: 67.0,
    std_dev: 15.0,
};

/// Median around five days with a heavy right tail.
pub const LOS_DAYS: Continuous = Continuous::LogNormal {
    mu: 1.6,
    sigma: 0.7,
};

pub const ZERO_PRIOR_ADMITS_PROBABILITY: f64 = 0.45;
pub const PRIOR_ADMITS_LAMBDA: f64 = 1.8;
pub const PRIOR_ADMITS_NONZERO: Bounds = Bounds::new(1.0, 8.0);

pub const ICU_STAY_PROBABILITY: f64 = 0.25;
pub const ICU_LOS_DAYS: Continuous = Continuous::LogNormal {
    mu: 0.8,
    sigma: 0.6,
};
pub const ICU_LOS_BOUNDS: Bounds = Bounds::new(0.5, 30.0);

pub const NUM_DIAGNOSES_LAMBDA: f64 = 5.5;

/// Bernoulli rates for the diagnosis and comorbidity flags.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosisRates {
    pub cerebral_infarction: f64,
    pub ich: f64,
    pub epilepsy: f64,
    pub parkinson: f64,
    pub alzheimer: f64,
    pub ms: f64,
    pub diabetes: f64,
    pub chf: f64,
    pub copd: f64,
    pub ckd: f64,
}

pub const DIAGNOSIS_RATES: DiagnosisRates = DiagnosisRates {
    cerebral_infarction: 0.22,
    ich: 0.09,
    epilepsy: 0.18,
    parkinson: 0.08,
    alzheimer: 0.07,
    ms: 0.04,
    diabetes: 0.28,
    chf: 0.18,
    copd: 0.14,
    ckd: 0.16,
};

pub const CREATININE: Continuous = Continuous::LogNormal {
    mu: 0.1,
    sigma: 0.35,
};
pub const CKD_CREATININE_FACTOR: f64 = 1.8;

pub const HEMOGLOBIN_FEMALE: Continuous = Continuous::Normal {
    mean: 12.2,
    std_dev: 1.8,
};
pub const HEMOGLOBIN_MALE: Continuous = Continuous::Normal {
    mean: 13.8,
    std_dev: 2.0,
};
pub const CKD_HEMOGLOBIN_OFFSET: f64 = 1.5;

pub const WBC: Continuous = Continuous::LogNormal {
    mu: 2.1,
    sigma: 0.35,
};

pub const GLUCOSE: Continuous = Continuous::LogNormal {
    mu: 4.8,
    sigma: 0.25,
};
pub const DIABETIC_GLUCOSE_FACTOR: f64 = 1.3;

pub const SODIUM: Continuous = Continuous::Normal {
    mean: 139.0,
    std_dev: 3.5,
};

pub const POTASSIUM: Continuous = Continuous::Normal {
    mean: 4.1,
    std_dev: 0.5,
};

/// BUN tracks creatinine: `creatinine * ratio + BUN_OFFSET`.
pub const BUN_RATIO: Continuous = Continuous::Normal {
    mean: 12.0,
    std_dev: 3.0,
};
pub const BUN_OFFSET: f64 = 5.0;

pub const PLATELET: Continuous = Continuous::Normal {
    mean: 220.0,
    std_dev: 75.0,
};

pub const NUM_MEDICATIONS_LAMBDA: f64 = 8.0;
pub const ANTICOAGULANT_PROBABILITY: f64 = 0.32;
pub const STATIN_PROBABILITY: f64 = 0.38;

/// Bernoulli rate picked by a diagnosis flag.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalRate {
    pub when_set: f64,
    pub otherwise: f64,
}

/// Keyed on `dx_diabetes`.
pub const INSULIN_RATE: ConditionalRate = ConditionalRate {
    when_set: 0.55,
    otherwise: 0.03,
};

/// Keyed on `dx_epilepsy`.
pub const ANTIEPILEPTIC_RATE: ConditionalRate = ConditionalRate {
    when_set: 0.85,
    otherwise: 0.12,
};

/// Intercept targets a readmission rate near 27%.
pub const READMISSION_WEIGHTS: RiskWeights = RiskWeights {
    intercept: -1.10,
    age: 0.15,
    prior_admits: 0.45,
    los_days: 0.08,
    creatinine: 0.30,
    hemoglobin: -0.18,
    wbc: 0.12,
    glucose: 0.08,
    sodium: -0.06,
    num_diagnoses: 0.10,
    cerebral_infarction: 0.25,
    ich: 0.35,
    chf: 0.15,
    ckd: 0.20,
    diabetes: 0.10,
    copd: 0.12,
    had_icu_stay: 0.18,
    num_medications: 0.05,
    prior_admits_x_ckd: 0.08,
    age_x_creatinine: 0.06,
    noise_std_dev: 0.3,
};

/// Base missingness: share of rows blanked for a column.
#[derive(Debug, Clone, Copy)]
pub struct MissingRule {
    pub column: &'static str,
    pub percent: f64,
}

/// Lab missingness in MIMIC-IV runs roughly 3-15% depending on the test.
pub const MISSING_RULES: &[MissingRule] = &[
    MissingRule {
        column: "creatinine",
        percent: 4.5,
    },
    MissingRule {
        column: "hemoglobin",
        percent: 7.2,
    },
    MissingRule {
        column: "wbc",
        percent: 5.8,
    },
    MissingRule {
        column: "glucose",
        percent: 12.5,
    },
    MissingRule {
        column: "sodium",
        percent: 4.0,
    },
    MissingRule {
        column: "potassium",
        percent: 6.1,
    },
    MissingRule {
        column: "bun",
        percent: 8.3,
    },
    MissingRule {
        column: "platelet",
        percent: 3.5,
    },
    MissingRule {
        column: "num_medications",
        percent: 2.5,
    },
];

/// Extra glucose missingness for non-diabetic admissions.
pub const GLUCOSE_MAR_PROBABILITY: f64 = 0.05;
