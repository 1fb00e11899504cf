/// Storage kind of a cohort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Sequential integer identifier.
    Id,
    /// Binary indicator written as `0`/`1`.
    Flag,
    Int,
    Float,
    Category,
}

/// Inclusive numeric range for a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the range.
    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Catalog entry describing one output column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub bounds: Option<Bounds>,
    /// Decimal places written for float columns.
    pub scale: Option<usize>,
    pub nullable: bool,
    pub labels: &'static [&'static str],
}

impl Column {
    const fn base(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            bounds: None,
            scale: None,
            nullable: false,
            labels: &[],
        }
    }

    pub const fn id(name: &'static str) -> Self {
        Self::base(name, ColumnKind::Id)
    }

    pub const fn flag(name: &'static str) -> Self {
        Self {
            bounds: Some(Bounds::new(0.0, 1.0)),
            ..Self::base(name, ColumnKind::Flag)
        }
    }

    pub const fn int(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            bounds: Some(Bounds::new(min, max)),
            ..Self::base(name, ColumnKind::Int)
        }
    }

    pub const fn float(name: &'static str, min: f64, max: f64, scale: usize) -> Self {
        Self {
            bounds: Some(Bounds::new(min, max)),
            scale: Some(scale),
            ..Self::base(name, ColumnKind::Float)
        }
    }

    pub const fn category(name: &'static str, labels: &'static [&'static str]) -> Self {
        Self {
            labels,
            ..Self::base(name, ColumnKind::Category)
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }
}

/// Number of columns in the cohort table.
pub const COLUMN_COUNT: usize = 37;

/// Cohort columns in output order.
///
/// `icu_los_days` is `0.0` for admissions without an ICU stay, so its lower
/// bound here is zero; the per-row rule lives in [`crate::validate_cohort`].
pub static COHORT_COLUMNS: [Column; COLUMN_COUNT] = [
    Column::id("subject_id"),
    Column::id("hadm_id"),
    Column::flag("readmit_30d"),
    Column::int("age_at_admit", 18.0, 99.0),
    Column::category("gender", &["M", "F"]),
    Column::category(
        "race",
        &[
            "WHITE",
            "BLACK/AFRICAN AMERICAN",
            "HISPANIC/LATINO",
            "ASIAN",
            "OTHER",
            "UNKNOWN",
        ],
    ),
    Column::category("insurance", &["Medicare", "Medicaid", "Other"]),
    Column::category(
        "marital_status",
        &["MARRIED", "SINGLE", "DIVORCED", "WIDOWED", "UNKNOWN"],
    ),
    Column::float("los_days", 1.0, 60.0, 1),
    Column::category("admission_type", &["URGENT", "EMERGENCY", "OBSERVATION"]),
    Column::int("prior_admits_12m", 0.0, 8.0),
    Column::flag("had_icu_stay"),
    Column::float("icu_los_days", 0.0, 30.0, 1),
    Column::int("num_diagnoses", 1.0, 20.0),
    Column::flag("dx_cerebral_infarction"),
    Column::flag("dx_ich"),
    Column::flag("dx_epilepsy"),
    Column::flag("dx_parkinson"),
    Column::flag("dx_alzheimer"),
    Column::flag("dx_ms"),
    Column::flag("dx_diabetes"),
    Column::flag("dx_chf"),
    Column::flag("dx_copd"),
    Column::flag("dx_ckd"),
    Column::float("creatinine", 0.3, 8.0, 2).nullable(),
    Column::float("hemoglobin", 5.0, 19.0, 1).nullable(),
    Column::float("wbc", 1.5, 35.0, 1).nullable(),
    Column::int("glucose", 50.0, 500.0).nullable(),
    Column::int("sodium", 118.0, 158.0).nullable(),
    Column::float("potassium", 2.5, 6.5, 1).nullable(),
    Column::int("bun", 5.0, 80.0).nullable(),
    Column::int("platelet", 30.0, 600.0).nullable(),
    Column::int("num_medications", 1.0, 25.0).nullable(),
    Column::flag("on_anticoagulant"),
    Column::flag("on_statin"),
    Column::flag("on_insulin"),
    Column::flag("on_antiepileptic"),
];

/// Position of `name` in [`COHORT_COLUMNS`].
pub fn column_index(name: &str) -> Option<usize> {
    COHORT_COLUMNS.iter().position(|column| column.name == name)
}

/// Catalog entry for `name`.
pub fn column(name: &str) -> Option<&'static Column> {
    column_index(name).map(|index| &COHORT_COLUMNS[index])
}
