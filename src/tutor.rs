//! The solve-and-diagnose pipeline for one request.
//!
//! `Created → QuantitiesBound → Solved → Classified → HintAttached? → Responded`,
//! strictly linear. A failure while solving short-circuits to an error; no
//! partial verdict is ever produced.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnose::{self, ErrorCategory, StudentAnswer};
use crate::error::TutorResult;
use crate::hint;
use crate::knowledge::Knowledge;
use crate::problem::{Given, ProblemBuilder};
use crate::solver;

// ── Wire types ──────────────────────────────────────────────────────────

/// A value/unit pair as submitted. `value` may be a number or a numeric
/// string; anything else counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuantityInput {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub unit: Option<String>,
}

impl QuantityInput {
    pub fn number(&self) -> Option<f64> {
        numeric(&self.value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GivenInput {
    #[serde(default)]
    pub mass: Option<QuantityInput>,
    #[serde(default)]
    pub acceleration: Option<QuantityInput>,
    #[serde(default)]
    pub force: Option<QuantityInput>,
}

impl GivenInput {
    pub fn values(&self) -> Given {
        let num = |q: &Option<QuantityInput>| q.as_ref().and_then(QuantityInput::number);
        Given {
            mass: num(&self.mass),
            acceleration: num(&self.acceleration),
            force: num(&self.force),
        }
    }
}

/// Body of `POST /api/solve`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    #[serde(default)]
    pub given: GivenInput,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub student_answer: QuantityInput,
}

impl SolveRequest {
    pub fn student_answer(&self) -> StudentAnswer {
        StudentAnswer {
            value: self.student_answer.number(),
            unit: self.student_answer.unit.clone().unwrap_or_default(),
        }
    }
}

/// Outcome of judging one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub correct: bool,
    pub correct_value: f64,
    pub target: String,
    pub error_type: ErrorCategory,
    pub hint: Option<String>,
}

/// Lenient numeric coercion: JSON numbers and numeric strings.
pub fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

// ── Pipeline ────────────────────────────────────────────────────────────

/// Stateless request handler over the shared startup knowledge base.
#[derive(Debug, Clone)]
pub struct Tutor {
    knowledge: Knowledge,
}

impl Tutor {
    pub fn new(knowledge: Knowledge) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// Run the pipeline for a decoded request.
    pub fn check(&self, request: &SolveRequest) -> TutorResult<Verdict> {
        self.evaluate(
            &request.target,
            &request.given.values(),
            &request.student_answer(),
        )
    }

    pub fn evaluate(
        &self,
        target: &str,
        given: &Given,
        answer: &StudentAnswer,
    ) -> TutorResult<Verdict> {
        let problem = ProblemBuilder::new(&self.knowledge)
            .build(target, given)
            .inspect_err(|e| tracing::warn!("Problem could not be built: {e}"))?;

        let solved = solver::solve_problem(&problem).inspect_err(|e| {
            tracing::warn!(problem = %problem.id, target = %problem.target, "Solve failed: {e}")
        })?;
        tracing::debug!(
            problem = %problem.id,
            formula = %solved.formula,
            correct_value = solved.correct_value,
            "Solved"
        );

        let error_type = diagnose::judge(solved.target, answer, solved.correct_value);
        let correct = error_type.is_correct();
        tracing::debug!(problem = %problem.id, %error_type, "Classified");

        let hint = hint::hint_for(self.knowledge.source(), error_type);

        Ok(Verdict {
            correct,
            correct_value: solved.correct_value,
            target: problem.target,
            error_type,
            hint,
        })
    }
}
