//! Judging a student's answer: numeric error classification and the loose
//! unit check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quantity::QuantityKind;

/// Relative error at or below which an answer is correct.
pub const CORRECT_TOLERANCE: f64 = 0.01;
/// Relative error above which an answer counts as a computational mistake.
pub const MATH_ERROR_THRESHOLD: f64 = 0.05;

/// Nature of the discrepancy between a student answer and the correct value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    None,
    Missing,
    Math,
    Unit,
    Other,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Missing => "missing",
            Self::Math => "math",
            Self::Unit => "unit",
            Self::Other => "other",
        }
    }

    pub fn is_correct(self) -> bool {
        self == Self::None
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the student submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentAnswer {
    pub value: Option<f64>,
    /// Unit exactly as typed.
    pub unit: String,
}

/// Absolute error when `correct` is zero, relative error otherwise.
pub fn relative_error(student: f64, correct: f64) -> f64 {
    let diff = (student - correct).abs();
    if correct == 0.0 { diff } else { diff / correct.abs() }
}

/// Classify a student value against the correct value.
///
/// Three bands: within 1% is correct, beyond 5% is a math error, anything
/// in between is `other`.
pub fn classify(student: Option<f64>, correct: Option<f64>) -> ErrorCategory {
    let Some(student) = student else {
        return ErrorCategory::Missing;
    };
    let Some(correct) = correct else {
        return ErrorCategory::Other;
    };

    let diff = relative_error(student, correct);
    if diff <= CORRECT_TOLERANCE {
        ErrorCategory::None
    } else if diff > MATH_ERROR_THRESHOLD {
        ErrorCategory::Math
    } else {
        ErrorCategory::Other
    }
}

/// Substring the unit string must contain for `target`.
pub fn unit_needle(target: QuantityKind) -> &'static str {
    match target {
        QuantityKind::Force => "N",
        QuantityKind::Mass => "kg",
        QuantityKind::Acceleration => "m/s",
    }
}

/// Loose lexical compatibility check of a typed unit against the target.
///
/// Only substring containment is tested, so `"kN"` passes for force and
/// `"km/s"` for acceleration.
pub fn check_unit(target: QuantityKind, unit: &str) -> bool {
    unit.contains(unit_needle(target))
}

/// Full judgement of one answer. A non-empty unit that fails
/// [`check_unit`] takes precedence over the numeric classification.
pub fn judge(target: QuantityKind, answer: &StudentAnswer, correct: f64) -> ErrorCategory {
    if !answer.unit.is_empty() && !check_unit(target, &answer.unit) {
        return ErrorCategory::Unit;
    }
    classify(answer.value, Some(correct))
}
