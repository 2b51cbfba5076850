//! Hint selection: maps an error category to remediation text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnose::ErrorCategory;
use crate::knowledge::KnowledgeSource;

pub const FALLBACK_UNIT_HINT: &str =
    "Check your units: use N for force, kg for mass, and m/s^2 for acceleration.";
pub const FALLBACK_MATH_HINT: &str =
    "Re-check your calculation - did you multiply or divide correctly?";
pub const GENERIC_HINT: &str =
    "Think about which variable is missing and how to rearrange F = m × a.";

/// Key of a hint entry in the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKey {
    Unit,
    Formula,
    Math,
    Other,
}

impl HintKey {
    pub const ALL: [HintKey; 4] = [Self::Unit, Self::Formula, Self::Math, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Formula => "formula",
            Self::Math => "math",
            Self::Other => "other",
        }
    }

    /// Built-in text used when the knowledge base has no entry.
    pub fn fallback_text(self) -> &'static str {
        match self {
            Self::Unit => FALLBACK_UNIT_HINT,
            Self::Math => FALLBACK_MATH_HINT,
            Self::Formula | Self::Other => GENERIC_HINT,
        }
    }
}

impl fmt::Display for HintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorCategory> for HintKey {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Unit => Self::Unit,
            ErrorCategory::Math => Self::Math,
            _ => Self::Other,
        }
    }
}

/// Text for `key`, from the knowledge base when it has the entry.
pub fn hint_text(kb: Option<&dyn KnowledgeSource>, key: HintKey) -> String {
    kb.and_then(|kb| kb.hint_text(key))
        .unwrap_or_else(|| key.fallback_text())
        .to_string()
}

/// Remediation hint for a classified answer. `None` for a correct answer.
pub fn hint_for(kb: Option<&dyn KnowledgeSource>, category: ErrorCategory) -> Option<String> {
    if category == ErrorCategory::None {
        return None;
    }
    Some(hint_text(kb, HintKey::from(category)))
}
