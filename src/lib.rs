// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # newton-tutor
//!
//! A solve-and-diagnose engine for Newton's second law exercises.
//!
//! Given two of {mass, acceleration, force}, the engine computes the third,
//! compares it with a student's answer, classifies the discrepancy and picks
//! a remediation hint.
//!
//! ## Architecture
//!
//! - **Quantities** (`quantity`): kinds, slots, unit and formula resolution
//! - **Arithmetic** (`arithmetic`): F = m·a and its inversions
//! - **Solver** (`solver`): computes the unknown into a new record
//! - **Diagnosis** (`diagnose`): tolerance bands and the loose unit check
//! - **Hints** (`hint`): category → remediation text with built-in fallbacks
//! - **Knowledge base** (`knowledge`): TOML-backed read-only store loaded at startup
//! - **Pipeline** (`tutor`): one request from problem creation to verdict
//! - **HTTP** (`server`, feature `server`): `POST /api/solve`
//!
//! ## Library usage
//!
//! ```no_run
//! use newton_tutor::diagnose::StudentAnswer;
//! use newton_tutor::knowledge::{Knowledge, KnowledgeConfig};
//! use newton_tutor::problem::Given;
//! use newton_tutor::tutor::Tutor;
//!
//! let tutor = Tutor::new(Knowledge::load(&KnowledgeConfig::Bundled));
//! let given = Given { mass: Some(4.0), acceleration: Some(3.0), force: None };
//! let answer = StudentAnswer { value: Some(11.0), unit: "N".into() };
//! let verdict = tutor.evaluate("force", &given, &answer).unwrap();
//! assert_eq!(verdict.correct_value, 12.0);
//! ```

pub mod arithmetic;
pub mod config;
pub mod diagnose;
pub mod error;
pub mod hint;
pub mod knowledge;
pub mod problem;
pub mod quantity;
#[cfg(feature = "server")]
pub mod server;
pub mod solver;
pub mod tutor;
