use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use rand::distr::{Bernoulli, Distribution};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use neurocohort_core::{
    AdmissionRecord, AdmissionType, Bounds, COHORT_COLUMNS, COLUMN_COUNT, CohortTable, Diagnoses,
    Gender, HADM_ID_BASE, Insurance, Labs, MaritalStatus, Medications, Race, SUBJECT_ID_BASE,
    column, validate_cohort,
};

use crate::errors::GenerationError;
use crate::missing::{apply_mask, mar_mask, mcar_mask, missing_count, union};
use crate::model::{GenerateOptions, GenerationReport, MissingRuleReport};
use crate::output::csv::write_cohort_csv;
use crate::params::{self, ConditionalRate};
use crate::risk::{RiskInputs, logistic, readmission_logit};
use crate::sampling::{
    Continuous, clip_to_int, round_to, sample_category, sample_continuous, sample_counts,
    sample_flags, sample_uniform, select_by_mask,
};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_path: PathBuf,
    /// Set when the JSON run report was written.
    pub report_path: Option<PathBuf>,
    pub table: CohortTable,
    pub report: GenerationReport,
}

/// In-memory cohort plus the bookkeeping the report needs.
#[derive(Debug, Clone)]
pub struct GeneratedCohort {
    pub table: CohortTable,
    /// Logistic readmission probability per row.
    pub readmission_probability: Vec<f64>,
    pub missing_rules: Vec<MissingRuleReport>,
    pub glucose_mar_rows: u64,
    pub glucose_masks: GlucoseMasks,
}

/// The two passes that blank glucose; the written column is their union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlucoseMasks {
    /// Rows picked by the glucose MCAR rule.
    pub base: Vec<bool>,
    /// Non-diabetic rows picked by the MAR pass.
    pub mar: Vec<bool>,
}

impl GlucoseMasks {
    /// Rows selected by both passes.
    pub fn overlap(&self) -> usize {
        self.base
            .iter()
            .zip(&self.mar)
            .filter(|(base, mar)| **base && **mar)
            .count()
    }
}

impl GeneratedCohort {
    pub fn readmitted(&self) -> u64 {
        self.table.rows().iter().filter(|row| row.readmit_30d).count() as u64
    }
}

/// Entry point for generating the synthetic cohort.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Build the cohort in memory without touching the filesystem.
    pub fn generate(&self) -> Result<GeneratedCohort, GenerationError> {
        let rows = self.options.rows;
        if rows == 0 {
            return Err(GenerationError::InvalidModel(
                "rows must be greater than zero".to_string(),
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.options.seed);
        info!(rows, seed = self.options.seed, "generating cohort");

        let demographics = draw_demographics(&mut rng, rows)?;
        let utilization = draw_utilization(&mut rng, rows)?;
        let diagnoses = draw_diagnoses(&mut rng, rows)?;
        let labs = draw_labs(&mut rng, rows, &demographics.gender, &diagnoses)?;
        let medications = draw_medications(&mut rng, rows, &diagnoses)?;
        debug!("feature columns drawn");

        let (readmission_probability, readmit_30d) = draw_outcome(
            &mut rng,
            rows,
            &demographics,
            &utilization,
            &diagnoses,
            &labs,
            &medications,
        )?;
        let readmitted = readmit_30d.iter().filter(|flag| **flag).count();
        info!(
            readmitted,
            readmission_rate = readmitted as f64 / rows as f64,
            "readmission outcome sampled"
        );

        let missing = apply_missingness(&mut rng, rows, &labs, &medications, &diagnoses.diabetes)?;

        let records = (0..rows)
            .map(|row| AdmissionRecord {
                subject_id: SUBJECT_ID_BASE + row as i64,
                hadm_id: HADM_ID_BASE + row as i64,
                readmit_30d: readmit_30d[row],
                age_at_admit: demographics.age[row],
                gender: demographics.gender[row],
                race: demographics.race[row],
                insurance: demographics.insurance[row],
                marital_status: demographics.marital_status[row],
                los_days: demographics.los_days[row],
                admission_type: demographics.admission_type[row],
                prior_admits_12m: utilization.prior_admits[row],
                had_icu_stay: utilization.had_icu_stay[row],
                icu_los_days: utilization.icu_los_days[row],
                num_diagnoses: diagnoses.num_diagnoses[row],
                diagnoses: diagnoses.row(row),
                labs: Labs {
                    creatinine: missing.creatinine[row],
                    hemoglobin: missing.hemoglobin[row],
                    wbc: missing.wbc[row],
                    glucose: missing.glucose[row],
                    sodium: missing.sodium[row],
                    potassium: missing.potassium[row],
                    bun: missing.bun[row],
                    platelet: missing.platelet[row],
                },
                medications: Medications {
                    num_medications: missing.num_medications[row],
                    on_anticoagulant: medications.on_anticoagulant[row],
                    on_statin: medications.on_statin[row],
                    on_insulin: medications.on_insulin[row],
                    on_antiepileptic: medications.on_antiepileptic[row],
                },
            })
            .collect();

        Ok(GeneratedCohort {
            table: CohortTable::new(records),
            readmission_probability,
            missing_rules: missing.rules,
            glucose_mar_rows: missing.glucose_mar_rows,
            glucose_masks: missing.glucose_masks,
        })
    }

    /// Generate, check invariants, write the CSV and the optional report.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let out_path = self.options.out_path.clone();

        info!(
            run_id = %run_id,
            rows = self.options.rows,
            seed = self.options.seed,
            out = %out_path.display(),
            "generation started"
        );

        let cohort = self.generate()?;
        validate_cohort(&cohort.table)?;
        let bytes_written = write_cohort_csv(&out_path, &cohort.table)?;

        let mut report = GenerationReport::new(run_id.clone(), self.options.seed);
        report.rows = cohort.table.len() as u64;
        report.columns = COLUMN_COUNT as u64;
        report.readmitted = cohort.readmitted();
        report.readmission_rate = report.readmitted as f64 / report.rows as f64;
        report.missing_rules = cohort.missing_rules.clone();
        report.glucose_mar_rows = cohort.glucose_mar_rows;
        for row in cohort.table.rows() {
            for (column, cell) in COHORT_COLUMNS.iter().zip(row.cells()) {
                if cell.is_null() {
                    report.record_missing(column.name);
                }
            }
        }
        report.bytes_written = bytes_written;
        report.duration_ms = start.elapsed().as_millis() as u64;

        if let Some(report_path) = &self.options.report_path {
            std::fs::write(report_path, serde_json::to_vec_pretty(&report)?)?;
            debug!(path = %report_path.display(), "report written");
        }

        info!(
            run_id = %run_id,
            rows = report.rows,
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            out_path,
            report_path: self.options.report_path.clone(),
            table: cohort.table,
            report,
        })
    }
}

struct Demographics {
    age: Vec<i64>,
    gender: Vec<Gender>,
    race: Vec<Race>,
    insurance: Vec<Insurance>,
    marital_status: Vec<MaritalStatus>,
    los_days: Vec<f64>,
    admission_type: Vec<AdmissionType>,
}

struct Utilization {
    prior_admits: Vec<i64>,
    had_icu_stay: Vec<bool>,
    icu_los_days: Vec<f64>,
}

struct DiagnosisColumns {
    num_diagnoses: Vec<i64>,
    cerebral_infarction: Vec<bool>,
    ich: Vec<bool>,
    epilepsy: Vec<bool>,
    parkinson: Vec<bool>,
    alzheimer: Vec<bool>,
    ms: Vec<bool>,
    diabetes: Vec<bool>,
    chf: Vec<bool>,
    copd: Vec<bool>,
    ckd: Vec<bool>,
}

impl DiagnosisColumns {
    fn row(&self, row: usize) -> Diagnoses {
        Diagnoses {
            cerebral_infarction: self.cerebral_infarction[row],
            ich: self.ich[row],
            epilepsy: self.epilepsy[row],
            parkinson: self.parkinson[row],
            alzheimer: self.alzheimer[row],
            ms: self.ms[row],
            diabetes: self.diabetes[row],
            chf: self.chf[row],
            copd: self.copd[row],
            ckd: self.ckd[row],
        }
    }
}

struct LabColumns {
    creatinine: Vec<f64>,
    hemoglobin: Vec<f64>,
    wbc: Vec<f64>,
    glucose: Vec<i64>,
    sodium: Vec<i64>,
    potassium: Vec<f64>,
    bun: Vec<i64>,
    platelet: Vec<i64>,
}

struct MedicationColumns {
    num_medications: Vec<i64>,
    on_anticoagulant: Vec<bool>,
    on_statin: Vec<bool>,
    on_insulin: Vec<bool>,
    on_antiepileptic: Vec<bool>,
}

struct MissingColumns {
    creatinine: Vec<Option<f64>>,
    hemoglobin: Vec<Option<f64>>,
    wbc: Vec<Option<f64>>,
    glucose: Vec<Option<i64>>,
    sodium: Vec<Option<i64>>,
    potassium: Vec<Option<f64>>,
    bun: Vec<Option<i64>>,
    platelet: Vec<Option<i64>>,
    num_medications: Vec<Option<i64>>,
    rules: Vec<MissingRuleReport>,
    glucose_mar_rows: u64,
    glucose_masks: GlucoseMasks,
}

fn draw_demographics(rng: &mut ChaCha8Rng, rows: usize) -> Result<Demographics, GenerationError> {
    let age_bounds = catalog_bounds("age_at_admit")?;
    let age = sample_continuous(rng, params::AGE, rows)?
        .into_iter()
        .map(|age| age_bounds.clip(age.trunc()) as i64)
        .collect();
    let gender = sample_category(rng, params::GENDER_WEIGHTS, rows)?;
    let race = sample_category(rng, params::RACE_WEIGHTS, rows)?;
    let insurance = sample_category(rng, params::INSURANCE_WEIGHTS, rows)?;
    let marital_status = sample_category(rng, params::MARITAL_STATUS_WEIGHTS, rows)?;
    let los_days = clip_round(&sample_continuous(rng, params::LOS_DAYS, rows)?, "los_days")?;
    let admission_type = sample_category(rng, params::ADMISSION_TYPE_WEIGHTS, rows)?;

    Ok(Demographics {
        age,
        gender,
        race,
        insurance,
        marital_status,
        los_days,
        admission_type,
    })
}

fn draw_utilization(rng: &mut ChaCha8Rng, rows: usize) -> Result<Utilization, GenerationError> {
    let zero_draws = sample_uniform(rng, rows);
    let nonzero = sample_counts(
        rng,
        params::PRIOR_ADMITS_LAMBDA,
        params::PRIOR_ADMITS_NONZERO,
        rows,
    )?;
    let prior_admits = zero_draws
        .iter()
        .zip(&nonzero)
        .map(|(draw, count)| {
            if *draw < params::ZERO_PRIOR_ADMITS_PROBABILITY {
                0
            } else {
                *count
            }
        })
        .collect();

    let had_icu_stay = sample_flags(rng, params::ICU_STAY_PROBABILITY, rows)?;
    let scale = catalog_scale("icu_los_days")?;
    let icu_los_days = had_icu_stay
        .iter()
        .zip(sample_continuous(rng, params::ICU_LOS_DAYS, rows)?)
        .map(|(icu, days)| {
            if *icu {
                round_to(params::ICU_LOS_BOUNDS.clip(days), scale)
            } else {
                0.0
            }
        })
        .collect();

    Ok(Utilization {
        prior_admits,
        had_icu_stay,
        icu_los_days,
    })
}

fn draw_diagnoses(rng: &mut ChaCha8Rng, rows: usize) -> Result<DiagnosisColumns, GenerationError> {
    let rates = params::DIAGNOSIS_RATES;
    let num_diagnoses = sample_counts(
        rng,
        params::NUM_DIAGNOSES_LAMBDA,
        catalog_bounds("num_diagnoses")?,
        rows,
    )?;

    Ok(DiagnosisColumns {
        num_diagnoses,
        cerebral_infarction: sample_flags(rng, rates.cerebral_infarction, rows)?,
        ich: sample_flags(rng, rates.ich, rows)?,
        epilepsy: sample_flags(rng, rates.epilepsy, rows)?,
        parkinson: sample_flags(rng, rates.parkinson, rows)?,
        alzheimer: sample_flags(rng, rates.alzheimer, rows)?,
        ms: sample_flags(rng, rates.ms, rows)?,
        diabetes: sample_flags(rng, rates.diabetes, rows)?,
        chf: sample_flags(rng, rates.chf, rows)?,
        copd: sample_flags(rng, rates.copd, rows)?,
        ckd: sample_flags(rng, rates.ckd, rows)?,
    })
}

fn draw_labs(
    rng: &mut ChaCha8Rng,
    rows: usize,
    gender: &[Gender],
    dx: &DiagnosisColumns,
) -> Result<LabColumns, GenerationError> {
    let creatinine = shift_where(
        &sample_continuous(rng, params::CREATININE, rows)?,
        &dx.ckd,
        |value| value * params::CKD_CREATININE_FACTOR,
    );
    let creatinine = clip_round(&creatinine, "creatinine")?;

    let female = sample_continuous(rng, params::HEMOGLOBIN_FEMALE, rows)?;
    let male = sample_continuous(rng, params::HEMOGLOBIN_MALE, rows)?;
    let is_female: Vec<bool> = gender.iter().map(|g| *g == Gender::Female).collect();
    let hemoglobin = shift_where(&select_by_mask(&is_female, &female, &male), &dx.ckd, |value| {
        value - params::CKD_HEMOGLOBIN_OFFSET
    });
    let hemoglobin = clip_round(&hemoglobin, "hemoglobin")?;

    let wbc = clip_round(&sample_continuous(rng, params::WBC, rows)?, "wbc")?;

    let glucose = shift_where(
        &sample_continuous(rng, params::GLUCOSE, rows)?,
        &dx.diabetes,
        |value| value * params::DIABETIC_GLUCOSE_FACTOR,
    );
    let glucose = clip_int(&glucose, "glucose")?;

    let sodium = clip_int(&sample_continuous(rng, params::SODIUM, rows)?, "sodium")?;
    let potassium = clip_round(&sample_continuous(rng, params::POTASSIUM, rows)?, "potassium")?;

    let bun: Vec<f64> = creatinine
        .iter()
        .zip(sample_continuous(rng, params::BUN_RATIO, rows)?)
        .map(|(creatinine, ratio)| creatinine * ratio + params::BUN_OFFSET)
        .collect();
    let bun = clip_int(&bun, "bun")?;

    let platelet = clip_int(&sample_continuous(rng, params::PLATELET, rows)?, "platelet")?;

    Ok(LabColumns {
        creatinine,
        hemoglobin,
        wbc,
        glucose,
        sodium,
        potassium,
        bun,
        platelet,
    })
}

fn draw_medications(
    rng: &mut ChaCha8Rng,
    rows: usize,
    dx: &DiagnosisColumns,
) -> Result<MedicationColumns, GenerationError> {
    let num_medications = sample_counts(
        rng,
        params::NUM_MEDICATIONS_LAMBDA,
        catalog_bounds("num_medications")?,
        rows,
    )?;
    let on_anticoagulant = sample_flags(rng, params::ANTICOAGULANT_PROBABILITY, rows)?;
    let on_statin = sample_flags(rng, params::STATIN_PROBABILITY, rows)?;
    let on_insulin = conditional_flags(rng, &dx.diabetes, params::INSULIN_RATE, rows)?;
    let on_antiepileptic = conditional_flags(rng, &dx.epilepsy, params::ANTIEPILEPTIC_RATE, rows)?;

    Ok(MedicationColumns {
        num_medications,
        on_anticoagulant,
        on_statin,
        on_insulin,
        on_antiepileptic,
    })
}

fn draw_outcome(
    rng: &mut ChaCha8Rng,
    rows: usize,
    demographics: &Demographics,
    utilization: &Utilization,
    dx: &DiagnosisColumns,
    labs: &LabColumns,
    medications: &MedicationColumns,
) -> Result<(Vec<f64>, Vec<bool>), GenerationError> {
    let age = as_f64(&demographics.age);
    let prior_admits = as_f64(&utilization.prior_admits);
    let glucose = as_f64(&labs.glucose);
    let sodium = as_f64(&labs.sodium);
    let num_diagnoses = as_f64(&dx.num_diagnoses);
    let num_medications = as_f64(&medications.num_medications);

    let inputs = RiskInputs {
        age: &age,
        prior_admits: &prior_admits,
        los_days: &demographics.los_days,
        creatinine: &labs.creatinine,
        hemoglobin: &labs.hemoglobin,
        wbc: &labs.wbc,
        glucose: &glucose,
        sodium: &sodium,
        num_diagnoses: &num_diagnoses,
        num_medications: &num_medications,
        cerebral_infarction: &dx.cerebral_infarction,
        ich: &dx.ich,
        chf: &dx.chf,
        ckd: &dx.ckd,
        diabetes: &dx.diabetes,
        copd: &dx.copd,
        had_icu_stay: &utilization.had_icu_stay,
    };
    let weights = params::READMISSION_WEIGHTS;
    let noise = sample_continuous(
        rng,
        Continuous::Normal {
            mean: 0.0,
            std_dev: weights.noise_std_dev,
        },
        rows,
    )?;

    let probability: Vec<f64> = readmission_logit(&inputs, &weights, &noise)
        .into_iter()
        .map(logistic)
        .collect();
    let readmit = probability
        .iter()
        .map(|p| {
            Bernoulli::new(*p)
                .map(|trial| trial.sample(&mut *rng))
                .map_err(|err| {
                    GenerationError::InvalidModel(format!("readmission probability {p}: {err}"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((probability, readmit))
}

fn apply_missingness(
    rng: &mut ChaCha8Rng,
    rows: usize,
    labs: &LabColumns,
    medications: &MedicationColumns,
    diabetes: &[bool],
) -> Result<MissingColumns, GenerationError> {
    let mut masks: HashMap<&'static str, Vec<bool>> = HashMap::new();
    let mut rules = Vec::with_capacity(params::MISSING_RULES.len());

    for rule in params::MISSING_RULES {
        if !column(rule.column).is_some_and(|column| column.nullable) {
            return Err(GenerationError::InvalidModel(format!(
                "missing rule targets non-nullable column '{}'",
                rule.column
            )));
        }
        let mask = mcar_mask(rng, rows, rule.percent)?;
        let count = missing_count(rows, rule.percent) as u64;
        info!(column = rule.column, missing = count, percent = rule.percent, "missingness applied");
        masks.insert(rule.column, mask);
        rules.push(MissingRuleReport {
            column: rule.column.to_string(),
            percent: rule.percent,
            rows: count,
        });
    }

    let non_diabetic: Vec<bool> = diabetes.iter().map(|flag| !flag).collect();
    let mar = mar_mask(rng, &non_diabetic, params::GLUCOSE_MAR_PROBABILITY)?;
    let glucose_mar_rows = mar.iter().filter(|flag| **flag).count() as u64;
    info!(extra = glucose_mar_rows, "glucose missingness applied to non-diabetic rows");

    let mut mask_for = |name: &str| masks.remove(name).unwrap_or_else(|| vec![false; rows]);
    let base = mask_for("glucose");
    let glucose_mask = union(&base, &mar);

    Ok(MissingColumns {
        creatinine: apply_mask(&labs.creatinine, &mask_for("creatinine")),
        hemoglobin: apply_mask(&labs.hemoglobin, &mask_for("hemoglobin")),
        wbc: apply_mask(&labs.wbc, &mask_for("wbc")),
        glucose: apply_mask(&labs.glucose, &glucose_mask),
        sodium: apply_mask(&labs.sodium, &mask_for("sodium")),
        potassium: apply_mask(&labs.potassium, &mask_for("potassium")),
        bun: apply_mask(&labs.bun, &mask_for("bun")),
        platelet: apply_mask(&labs.platelet, &mask_for("platelet")),
        num_medications: apply_mask(&medications.num_medications, &mask_for("num_medications")),
        rules,
        glucose_mar_rows,
        glucose_masks: GlucoseMasks { base, mar },
    })
}

fn conditional_flags(
    rng: &mut ChaCha8Rng,
    mask: &[bool],
    rate: ConditionalRate,
    rows: usize,
) -> Result<Vec<bool>, GenerationError> {
    let when_set = sample_flags(rng, rate.when_set, rows)?;
    let otherwise = sample_flags(rng, rate.otherwise, rows)?;
    Ok(select_by_mask(mask, &when_set, &otherwise))
}

fn shift_where(values: &[f64], mask: &[bool], shift: impl Fn(f64) -> f64) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .map(|(value, set)| if *set { shift(*value) } else { *value })
        .collect()
}

fn clip_round(values: &[f64], name: &str) -> Result<Vec<f64>, GenerationError> {
    let bounds = catalog_bounds(name)?;
    let scale = catalog_scale(name)?;
    Ok(values
        .iter()
        .map(|value| round_to(bounds.clip(*value), scale))
        .collect())
}

fn clip_int(values: &[f64], name: &str) -> Result<Vec<i64>, GenerationError> {
    let bounds = catalog_bounds(name)?;
    Ok(values.iter().map(|value| clip_to_int(*value, bounds)).collect())
}

fn as_f64(values: &[i64]) -> Vec<f64> {
    values.iter().map(|value| *value as f64).collect()
}

fn catalog_bounds(name: &str) -> Result<Bounds, GenerationError> {
    column(name)
        .and_then(|column| column.bounds)
        .ok_or_else(|| GenerationError::InvalidModel(format!("column '{name}' has no bounds")))
}

fn catalog_scale(name: &str) -> Result<usize, GenerationError> {
    column(name)
        .and_then(|column| column.scale)
        .ok_or_else(|| GenerationError::InvalidModel(format!("column '{name}' has no scale")))
}
