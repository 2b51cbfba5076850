//! Rich diagnostic error types for the newton-tutor engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know what went wrong and how
//! the exercise input has to change.

use miette::Diagnostic;
use thiserror::Error;

use crate::knowledge::KnowledgeError;
use crate::quantity::QuantityKind;

/// Top-level error type for one solve-and-diagnose request.
#[derive(Debug, Error, Diagnostic)]
pub enum TutorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Knowledge(#[from] KnowledgeError),
}

impl TutorError {
    /// Whether the failure was caused by the request itself rather than the
    /// service (maps to HTTP 400 vs 500).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Solve(_))
    }
}

// ---------------------------------------------------------------------------
// Solver errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum SolveError {
    #[error("Invalid target")]
    #[diagnostic(
        code(newton::solve::invalid_target),
        help("The target must be one of \"mass\", \"acceleration\" or \"force\".")
    )]
    InvalidTarget { target: String },

    #[error("{} are required to compute {target}.", .target.required_inputs())]
    #[diagnostic(
        code(newton::solve::missing_input),
        help("Provide values for both known quantities; only the target may be left out.")
    )]
    MissingInput { target: QuantityKind },

    #[error("Division by zero - check your input values.")]
    #[diagnostic(
        code(newton::solve::division_by_zero),
        help(
            "Acceleration is force divided by mass and mass is force divided by \
             acceleration, so the dividing quantity must be non-zero."
        )
    )]
    DivisionByZero {
        target: QuantityKind,
        divisor: QuantityKind,
    },

    #[error("The computed {target} is too large to represent - check your input values.")]
    #[diagnostic(
        code(newton::solve::non_finite),
        help(
            "The inputs are valid numbers but their product or quotient overflows \
             a 64-bit float."
        )
    )]
    NonFiniteResult { target: QuantityKind },
}

pub type SolveResult<T> = std::result::Result<T, SolveError>;

pub type TutorResult<T> = std::result::Result<T, TutorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_message_names_both_inputs() {
        let err = SolveError::MissingInput {
            target: QuantityKind::Force,
        };
        assert_eq!(
            err.to_string(),
            "Mass and acceleration are required to compute force."
        );

        let err = SolveError::MissingInput {
            target: QuantityKind::Mass,
        };
        assert_eq!(
            err.to_string(),
            "Force and acceleration are required to compute mass."
        );
    }

    #[test]
    fn invalid_target_message_is_stable() {
        let err = SolveError::InvalidTarget {
            target: "energy".into(),
        };
        assert_eq!(err.to_string(), "Invalid target");
    }

    #[test]
    fn non_finite_result_names_target() {
        let err = SolveError::NonFiniteResult {
            target: QuantityKind::Force,
        };
        assert_eq!(
            err.to_string(),
            "The computed force is too large to represent - check your input values."
        );
        assert!(TutorError::from(err).is_client_error());
    }

    #[test]
    fn client_vs_service_errors() {
        let solve: TutorError = SolveError::DivisionByZero {
            target: QuantityKind::Mass,
            divisor: QuantityKind::Acceleration,
        }
        .into();
        assert!(solve.is_client_error());

        let kb: TutorError = KnowledgeError::Unavailable.into();
        assert!(!kb.is_client_error());
    }
}
