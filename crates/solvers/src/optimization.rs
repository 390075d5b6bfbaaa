//! Solvers for minimization problems.
//!
//! A [`MinimizationProblem`] maps solver variables `x: &[f64]` to model
//! inputs, calls the model, and extracts a scalar objective and its gradient.
//! Solvers in this module search for the `x` that minimizes that objective.
//!
//! # Solvers
//!
//! - [`lbfgs`] — limited-memory BFGS with a Moré–Thuente line search, usable
//!   through a model/problem driver or a reverse-communication state machine
//!
//! [`MinimizationProblem`]: descent_core::MinimizationProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod lbfgs;
