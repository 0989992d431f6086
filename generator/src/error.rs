//! Generator errors.

use std::fmt;

use model::ModelError;

/// Result type for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors returned by [`crate::DataGenerator`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GenerateError {
    /// A caller precondition was violated, for example an empty menu handed
    /// to order generation. Callers must filter to usable fixtures first.
    InvalidInput {
        restaurant_id: String,
        reason: ModelError,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                restaurant_id,
                reason,
            } => write!(
                f,
                "invalid input for restaurant {restaurant_id}: {reason}"
            ),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput { reason, .. } => Some(reason),
        }
    }
}
