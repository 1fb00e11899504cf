use crate::schema::{COLUMN_COUNT, Column};
use crate::types::{AdmissionType, Category, Gender, Insurance, MaritalStatus, Race};

/// Value of a single cohort cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Null,
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn to_csv(&self, column: &Column) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Int(value) => value.to_string(),
            CellValue::Float(value) => {
                if let Some(scale) = column.scale {
                    format!("{value:.scale$}")
                } else {
                    value.to_string()
                }
            }
            CellValue::Text(value) => (*value).to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(value) => Some(*value as f64),
            CellValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    fn flag(value: bool) -> Self {
        CellValue::Int(i64::from(value))
    }

    fn optional_int(value: Option<i64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Int)
    }

    fn optional_float(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Float)
    }
}

/// ICD-10 derived diagnosis and comorbidity flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnoses {
    /// I63
    pub cerebral_infarction: bool,
    /// I61
    pub ich: bool,
    /// G40
    pub epilepsy: bool,
    /// G20
    pub parkinson: bool,
    /// G30
    pub alzheimer: bool,
    /// G35
    pub ms: bool,
    pub diabetes: bool,
    pub chf: bool,
    pub copd: bool,
    pub ckd: bool,
}

/// Last laboratory values before discharge. `None` marks a missing result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Labs {
    pub creatinine: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub wbc: Option<f64>,
    pub glucose: Option<i64>,
    pub sodium: Option<i64>,
    pub potassium: Option<f64>,
    pub bun: Option<i64>,
    pub platelet: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Medications {
    pub num_medications: Option<i64>,
    pub on_anticoagulant: bool,
    pub on_statin: bool,
    pub on_insulin: bool,
    pub on_antiepileptic: bool,
}

/// One synthetic hospital admission.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionRecord {
    pub subject_id: i64,
    pub hadm_id: i64,
    pub readmit_30d: bool,
    pub age_at_admit: i64,
    pub gender: Gender,
    pub race: Race,
    pub insurance: Insurance,
    pub marital_status: MaritalStatus,
    pub los_days: f64,
    pub admission_type: AdmissionType,
    pub prior_admits_12m: i64,
    pub had_icu_stay: bool,
    pub icu_los_days: f64,
    pub num_diagnoses: i64,
    pub diagnoses: Diagnoses,
    pub labs: Labs,
    pub medications: Medications,
}

impl AdmissionRecord {
    /// Cells in [`crate::COHORT_COLUMNS`] order.
    pub fn cells(&self) -> [CellValue; COLUMN_COUNT] {
        let dx = &self.diagnoses;
        let labs = &self.labs;
        let meds = &self.medications;
        [
            CellValue::Int(self.subject_id),
            CellValue::Int(self.hadm_id),
            CellValue::flag(self.readmit_30d),
            CellValue::Int(self.age_at_admit),
            CellValue::Text(self.gender.label()),
            CellValue::Text(self.race.label()),
            CellValue::Text(self.insurance.label()),
            CellValue::Text(self.marital_status.label()),
            CellValue::Float(self.los_days),
            CellValue::Text(self.admission_type.label()),
            CellValue::Int(self.prior_admits_12m),
            CellValue::flag(self.had_icu_stay),
            CellValue::Float(self.icu_los_days),
            CellValue::Int(self.num_diagnoses),
            CellValue::flag(dx.cerebral_infarction),
            CellValue::flag(dx.ich),
            CellValue::flag(dx.epilepsy),
            CellValue::flag(dx.parkinson),
            CellValue::flag(dx.alzheimer),
            CellValue::flag(dx.ms),
            CellValue::flag(dx.diabetes),
            CellValue::flag(dx.chf),
            CellValue::flag(dx.copd),
            CellValue::flag(dx.ckd),
            CellValue::optional_float(labs.creatinine),
            CellValue::optional_float(labs.hemoglobin),
            CellValue::optional_float(labs.wbc),
            CellValue::optional_int(labs.glucose),
            CellValue::optional_int(labs.sodium),
            CellValue::optional_float(labs.potassium),
            CellValue::optional_int(labs.bun),
            CellValue::optional_int(labs.platelet),
            CellValue::optional_int(meds.num_medications),
            CellValue::flag(meds.on_anticoagulant),
            CellValue::flag(meds.on_statin),
            CellValue::flag(meds.on_insulin),
            CellValue::flag(meds.on_antiepileptic),
        ]
    }
}

/// Generated cohort, immutable once assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortTable {
    rows: Vec<AdmissionRecord>,
}

impl CohortTable {
    pub fn new(rows: Vec<AdmissionRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AdmissionRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the column at `index`, one per row.
    pub fn column_values(&self, index: usize) -> Vec<CellValue> {
        self.rows.iter().map(|row| row.cells()[index]).collect()
    }
}
