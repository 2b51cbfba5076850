//! Solver: computes the unknown quantity of a problem.
//!
//! The value computed here is the authoritative correct answer. Solving
//! never mutates the problem; it returns a new [`SolvedProblem`] with the
//! target slot filled.

use crate::arithmetic;
use crate::error::{SolveError, SolveResult};
use crate::problem::{Problem, ProblemId};
use crate::quantity::{Formula, Quantities, QuantityKind};

/// Result of solving one problem.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedProblem {
    pub problem_id: ProblemId,
    pub target: QuantityKind,
    pub formula: Formula,
    /// All three slots, the target now holding `correct_value`.
    pub quantities: Quantities,
    pub correct_value: f64,
}

/// Compute `target` from the other two values. Any value given for the
/// target itself is ignored. A result that overflows to infinity is an error.
pub fn solve_kind(
    target: QuantityKind,
    mass: Option<f64>,
    acceleration: Option<f64>,
    force: Option<f64>,
) -> SolveResult<f64> {
    let missing = || SolveError::MissingInput { target };
    let value = match target {
        QuantityKind::Force => {
            let (m, a) = mass.zip(acceleration).ok_or_else(missing)?;
            Ok(arithmetic::force(m, a))
        }
        QuantityKind::Acceleration => {
            let (f, m) = force.zip(mass).ok_or_else(missing)?;
            arithmetic::acceleration(f, m)
        }
        QuantityKind::Mass => {
            let (f, a) = force.zip(acceleration).ok_or_else(missing)?;
            arithmetic::mass(f, a)
        }
    }?;
    if !value.is_finite() {
        return Err(SolveError::NonFiniteResult { target });
    }
    Ok(value)
}

/// Compute the quantity named `target`.
pub fn solve(
    target: &str,
    mass: Option<f64>,
    acceleration: Option<f64>,
    force: Option<f64>,
) -> SolveResult<f64> {
    let kind = target
        .parse::<QuantityKind>()
        .map_err(|_| SolveError::InvalidTarget {
            target: target.to_string(),
        })?;
    solve_kind(kind, mass, acceleration, force)
}

/// Solve a built problem, returning a new record with the unknown filled.
pub fn solve_problem(problem: &Problem) -> SolveResult<SolvedProblem> {
    let formula = problem.formula.ok_or_else(|| SolveError::InvalidTarget {
        target: problem.target.clone(),
    })?;
    let target = formula.target();
    let q = &problem.quantities;

    let correct_value = solve_kind(
        target,
        q.value(QuantityKind::Mass),
        q.value(QuantityKind::Acceleration),
        q.value(QuantityKind::Force),
    )?;

    Ok(SolvedProblem {
        problem_id: problem.id.clone(),
        target,
        formula,
        quantities: q.with_value(target, correct_value),
        correct_value,
    })
}
