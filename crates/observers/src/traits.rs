//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasIteration`] — events tied to an outer iteration
//! - [`HasObjective`] — events that carry an objective value
//! - [`HasGradientNorm`] — events that carry a gradient norm
//! - [`HasStep`] — events that carry an accepted step length
//! - [`HasEvaluations`] — events that carry an evaluation count
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use descent_core::Observer;
//! use descent_observers::traits::{CanStopEarly, HasObjective};
//!
//! struct BelowTarget {
//!     target: f64,
//! }
//!
//! impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for BelowTarget {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.objective() < self.target).then(A::stop_early)
//!     }
//! }
//! ```

use descent_solvers::optimization::lbfgs;

/// An event tied to an outer solver iteration.
pub trait HasIteration {
    /// Returns the iteration count at this event.
    fn iteration(&self) -> usize;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    fn objective(&self) -> f64;
}

/// An event that carries the norm of a gradient.
pub trait HasGradientNorm {
    /// Returns the Euclidean gradient norm for this event.
    fn gradient_norm(&self) -> f64;
}

/// An event that carries the step length a line search accepted.
pub trait HasStep {
    /// Returns the accepted step length.
    fn step(&self) -> f64;
}

/// An event that carries a running count of objective evaluations.
pub trait HasEvaluations {
    /// Returns the evaluations made so far.
    fn evaluations(&self) -> usize;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- lbfgs::Event ---

impl<I, O> HasIteration for lbfgs::Event<'_, I, O> {
    fn iteration(&self) -> usize {
        self.progress.iteration
    }
}

impl<I, O> HasObjective for lbfgs::Event<'_, I, O> {
    fn objective(&self) -> f64 {
        self.progress.objective
    }
}

impl<I, O> HasGradientNorm for lbfgs::Event<'_, I, O> {
    fn gradient_norm(&self) -> f64 {
        self.progress.gradient_norm
    }
}

impl<I, O> HasStep for lbfgs::Event<'_, I, O> {
    fn step(&self) -> f64 {
        self.progress.step
    }
}

impl<I, O> HasEvaluations for lbfgs::Event<'_, I, O> {
    fn evaluations(&self) -> usize {
        self.progress.evaluations
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for lbfgs::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
