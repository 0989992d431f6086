//! Driver errors.

use std::fmt;

/// Result type for load runs.
pub type DriverResult<T> = Result<T, DriverError>;

/// Run-level driver failures. Individual order failures are outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DriverError {
    /// The load configuration cannot be run.
    InvalidConfig { message: String },

    /// A finished run exceeded a budget.
    BudgetExceeded {
        metric: &'static str,
        value: f64,
        budget: f64,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => write!(f, "invalid load config: {message}"),
            Self::BudgetExceeded {
                metric,
                value,
                budget,
            } => write!(f, "{metric} {value} exceeds budget {budget}"),
        }
    }
}

impl std::error::Error for DriverError {}
