//! Problem builder: materializes one exercise and its three quantity slots.
//!
//! Building a problem requires the knowledge base; without it the request
//! cannot proceed (see [`KnowledgeError::Unavailable`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::knowledge::{Knowledge, KnowledgeError, KnowledgeResult};
use crate::quantity::{self, Formula, Quantities, QuantityKind, QuantitySlot};

/// Opaque unique identifier of a problem instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemId(String);

impl ProblemId {
    /// A fresh random identifier, `Problem_` followed by 32 hex digits.
    pub fn generate() -> Self {
        Self(format!("Problem_{:032x}", rand::random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Known input values, each optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Given {
    pub mass: Option<f64>,
    pub acceleration: Option<f64>,
    pub force: Option<f64>,
}

impl Given {
    pub fn get(&self, kind: QuantityKind) -> Option<f64> {
        match kind {
            QuantityKind::Mass => self.mass,
            QuantityKind::Acceleration => self.acceleration,
            QuantityKind::Force => self.force,
        }
    }
}

/// One exercise: the unknown's name, the three slots and the law applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub id: ProblemId,
    /// Requested target, lowercased. Not necessarily a valid quantity.
    pub target: String,
    pub quantities: Quantities,
    /// `None` when `target` is not a quantity of F = m·a.
    pub formula: Option<Formula>,
    /// Knowledge-base identifier of `formula`, when it has one.
    pub formula_id: Option<String>,
}

/// Builds [`Problem`]s against the startup knowledge base.
pub struct ProblemBuilder<'a> {
    knowledge: &'a Knowledge,
}

impl<'a> ProblemBuilder<'a> {
    pub fn new(knowledge: &'a Knowledge) -> Self {
        Self { knowledge }
    }

    pub fn build(&self, target: &str, given: &Given) -> KnowledgeResult<Problem> {
        let kb = self.knowledge.source().ok_or(KnowledgeError::Unavailable)?;

        let target = target.trim().to_lowercase();
        let formula = quantity::formula_for(&target);
        let formula_id = formula.and_then(|f| kb.formula_id(f)).map(str::to_string);

        let slot = |kind: QuantityKind| {
            QuantitySlot::new(kind, quantity::unit_for(Some(kb), kind.as_str()))
                .with_value(given.get(kind))
        };
        let quantities = Quantities {
            mass: slot(QuantityKind::Mass),
            acceleration: slot(QuantityKind::Acceleration),
            force: slot(QuantityKind::Force),
        };

        let id = ProblemId::generate();
        tracing::debug!(
            problem = %id,
            target = %target,
            formula = ?formula,
            "Problem created"
        );

        Ok(Problem {
            id,
            target,
            quantities,
            formula,
            formula_id,
        })
    }
}
