//! Error types.
//!
//! Only input and configuration problems are errors. Constraint violations
//! inside a load plan (overweight, missing pallets, ...) are never errors:
//! they are priced by the fitness function instead.

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the planning API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid inventory: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("population is empty after generation {0}")]
    EmptyPopulation(usize),
}

/// Rejections raised while building the inventory catalog.
///
/// Rows are reported 1-based, as a spreadsheet user would count them
/// (header excluded).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: expected {expected} cells, found {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: empty sku identifier")]
    EmptySku { row: usize },
    #[error("row {row}, column `{column}`: `{value}` is not a number")]
    NonNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}, column `{column}`: {value} must not be negative")]
    Negative {
        row: usize,
        column: &'static str,
        value: f64,
    },
    #[error("row {row}, column `{column}`: {value} must be positive")]
    NonPositive {
        row: usize,
        column: &'static str,
        value: f64,
    },
    #[error("row {row}, column `{column}`: {value} is not a whole number")]
    Fractional {
        row: usize,
        column: &'static str,
        value: f64,
    },
    #[error("row {row}: duplicate sku `{sku}`")]
    DuplicateSku { row: usize, sku: String },
}
