use descent_core::Snapshot;

/// Indicates why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The gradient test passed.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of an L-BFGS run.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// Final solver status.
    pub status: Status,

    /// Last accepted point.
    pub x: Vec<f64>,

    /// Objective at `x`.
    pub objective: f64,

    /// Norm of the gradient at `x`.
    pub gradient_norm: f64,

    /// Snapshot at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Accepted steps.
    pub iters: usize,

    /// Objective/gradient evaluations, including the one at the start point.
    pub evals: usize,
}
