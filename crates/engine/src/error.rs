//! Engine error types

use duskmire_domain::DomainError;
use thiserror::Error;

/// Errors surfaced by the resolution services
#[derive(Debug, Error)]
pub enum EngineError {
    /// A domain rule rejected the operation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The requested skill is not registered with the runner
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    /// The difficulty name does not appear in the ladder
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts() {
        let domain = DomainError::validation("bad input");
        let engine: EngineError = domain.into();
        assert!(matches!(engine, EngineError::Domain(_)));
        assert_eq!(engine.to_string(), "Validation failed: bad input");
    }

    #[test]
    fn test_unknown_skill_message() {
        let err = EngineError::UnknownSkill("basket_weaving".to_string());
        assert_eq!(err.to_string(), "Unknown skill: basket_weaving");
    }
}
