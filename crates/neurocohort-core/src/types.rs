/// Closed vocabulary of a categorical cohort column.
///
/// `ALL` lists the variants in the order their labels appear in the catalog.
pub trait Category: Copy + Eq + 'static {
    const ALL: &'static [Self];

    /// Label written to the CSV output.
    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Category for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn label(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    White,
    Black,
    Hispanic,
    Asian,
    Other,
    Unknown,
}

impl Category for Race {
    const ALL: &'static [Self] = &[
        Self::White,
        Self::Black,
        Self::Hispanic,
        Self::Asian,
        Self::Other,
        Self::Unknown,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::White => "WHITE",
            Self::Black => "BLACK/AFRICAN AMERICAN",
            Self::Hispanic => "HISPANIC/LATINO",
            Self::Asian => "ASIAN",
            Self::Other => "OTHER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Insurance {
    Medicare,
    Medicaid,
    Other,
}

impl Category for Insurance {
    const ALL: &'static [Self] = &[Self::Medicare, Self::Medicaid, Self::Other];

    fn label(self) -> &'static str {
        match self {
            Self::Medicare => "Medicare",
            Self::Medicaid => "Medicaid",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaritalStatus {
    Married,
    Single,
    Divorced,
    Widowed,
    Unknown,
}

impl Category for MaritalStatus {
    const ALL: &'static [Self] = &[
        Self::Married,
        Self::Single,
        Self::Divorced,
        Self::Widowed,
        Self::Unknown,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Married => "MARRIED",
            Self::Single => "SINGLE",
            Self::Divorced => "DIVORCED",
            Self::Widowed => "WIDOWED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Admission type; elective admissions are excluded from the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmissionType {
    Urgent,
    Emergency,
    Observation,
}

impl Category for AdmissionType {
    const ALL: &'static [Self] = &[Self::Urgent, Self::Emergency, Self::Observation];

    fn label(self) -> &'static str {
        match self {
            Self::Urgent => "URGENT",
            Self::Emergency => "EMERGENCY",
            Self::Observation => "OBSERVATION",
        }
    }
}
