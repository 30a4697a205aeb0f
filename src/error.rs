//! Error types for evoxide
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::representation::Representation;

/// Error type for expression construction and evaluation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// Evaluation was attempted on an expression with no conditions
    #[error("expression has no conditions to evaluate")]
    Empty,

    /// `begin` was called on an expression that already has a condition
    #[error("expression already started with a condition")]
    AlreadyStarted,

    /// A concatenator was appended before any starting condition
    #[error("expression must begin with a condition")]
    NotStarted,
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Invalid or incomplete configuration, rejected at setup time
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An operator was wired to a chromosome representation it does not support
    #[error("operator {operator} does not support the {representation} representation")]
    RepresentationMismatch {
        operator: &'static str,
        representation: Representation,
    },

    /// An operator was invoked on a population below its structural minimum
    #[error("{operator} requires a population of at least {required}, got {actual}")]
    PopulationTooSmall {
        operator: &'static str,
        required: usize,
        actual: usize,
    },

    /// Empty population where at least one individual was required
    #[error("empty population")]
    EmptyPopulation,

    /// Expression error
    #[error("expression error: {0}")]
    Expression(#[from] ExpressionError),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_error_display() {
        assert_eq!(
            ExpressionError::Empty.to_string(),
            "expression has no conditions to evaluate"
        );
        assert_eq!(
            ExpressionError::AlreadyStarted.to_string(),
            "expression already started with a condition"
        );
    }

    #[test]
    fn test_evolution_error_from_expression_error() {
        let err: EvolutionError = ExpressionError::NotStarted.into();
        assert!(matches!(err, EvolutionError::Expression(_)));
    }

    #[test]
    fn test_population_too_small_display() {
        let err = EvolutionError::PopulationTooSmall {
            operator: "BlendCrossover",
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "BlendCrossover requires a population of at least 2, got 1"
        );
    }

    #[test]
    fn test_representation_mismatch_display() {
        let err = EvolutionError::RepresentationMismatch {
            operator: "GaussianMutation",
            representation: Representation::Binary,
        };
        assert!(err.to_string().contains("GaussianMutation"));
        assert!(err.to_string().contains("binary"));
    }
}
