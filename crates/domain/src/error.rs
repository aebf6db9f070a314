//! Unified error types for the domain layer
//!
//! The resolution core knows exactly two error classes: construction-time
//! validation failures (caller bugs: negative delta magnitudes, empty
//! identifiers, zero-die pools) and parse failures for dice notation.
//! Everything else that can happen in play - clamped values, fumbles,
//! terminal stages - is an ordinary return value, never an error.

use thiserror::Error;

use crate::value_objects::DicePoolParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for contract violations.
    ///
    /// Use this when a caller passes data that no legitimate game state can
    /// produce: negative amounts where direction is expressed by the method
    /// name, empty skill identifiers, out-of-range die faces.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<DicePoolParseError> for DomainError {
    fn from(err: DicePoolParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("amount cannot be negative");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: amount cannot be negative"
        );
    }

    #[test]
    fn test_from_pool_parse_error() {
        let pool_err = DicePoolParseError::Empty;
        let domain_err: DomainError = pool_err.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
        assert!(domain_err.to_string().contains("Empty dice pool notation"));
    }
}
