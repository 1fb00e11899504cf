use thiserror::Error;

/// Core error type shared across neurocohort crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A cohort table violates a catalog invariant.
    #[error("invalid cohort: {0}")]
    InvalidCohort(String),
}

/// Convenience alias for results returned by neurocohort crates.
pub type Result<T> = std::result::Result<T, Error>;
