//! Limited-memory BFGS for smooth unconstrained minimization.
//!
//! # Algorithm
//!
//! L-BFGS approximates the inverse Hessian from the `m` most recent
//! correction pairs `(s, y)`, where `s` is a step and `y` the gradient change
//! it produced. Each iteration computes a direction with the two-loop
//! recursion and runs a Moré–Thuente line search along it until the strong
//! Wolfe conditions hold. The run converges when
//! `‖g‖ / max(1, ‖x‖) <= eps`.
//!
//! # Entry Points
//!
//! - [`minimize`] evaluates a [`MinimizationProblem`] through a [`Model`]
//!   and reports each accepted step to an observer.
//! - [`Lbfgs`] is the underlying reverse-communication state machine for
//!   callers that evaluate the objective themselves.
//! - [`LineSearch`] can be used on its own along any descent direction.
//!
//! # Diagonal
//!
//! By default the initial inverse Hessian is `γI` with `γ = y·s / y·y`
//! from the newest pair. If [`MinimizationProblem::diagonal`] returns `Some`
//! at the starting point, that diagonal is used instead and refreshed after
//! every accepted step.
//!
//! # Observer Events
//!
//! The driver emits one [`Event`] per accepted step. Observers can return
//! [`Action::StopEarly`] to end the run at that point.
//!
//! # Errors
//!
//! Every failure ends the run. The solver does not retry line searches or
//! relax tolerances; restart with a different point or config instead.

mod action;
mod config;
mod error;
mod event;
mod guarded;
mod history;
mod kernels;
mod line_search;
mod mcstep;
mod optimizer;
mod progress;
mod search;
mod solution;
mod two_loop;


pub use action::Action;
pub use config::{Config, ParameterError};
pub use error::Error;
pub use event::Event;
pub use guarded::{NumericOverflow, Operation, safe_divide, safe_multiply};
pub use line_search::{LineSearch, LineSearchFailure, Outcome, Params};
pub use mcstep::{BracketError, Case};
pub use optimizer::{Diagonal, Lbfgs, Reply, Request};
pub use progress::Progress;
pub use solution::{Solution, Status};

use descent_core::{MinimizationProblem, Model, Observer};

use search::search;

/// Minimizes the objective with L-BFGS starting from `x0`.
///
/// The observer receives an [`Event`] after every accepted step.
///
/// # Errors
///
/// Returns an error if the config is invalid, the model or problem fails,
/// or the line search cannot make progress.
pub fn minimize<M, P, Obs>(
    model: &M,
    problem: &P,
    x0: &[f64],
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    search(model, problem, x0, config, observer)
}

/// Minimizes the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the config is invalid, the model or problem fails,
/// or the line search cannot make progress.
pub fn minimize_unobserved<M, P>(
    model: &M,
    problem: &P,
    x0: &[f64],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    minimize(model, problem, x0, config, ())
}
