/// Counters and values after the most recent accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Accepted steps so far.
    pub iteration: usize,

    /// Objective/gradient evaluations, including the one at the start point.
    pub evaluations: usize,

    /// Objective at the accepted point.
    pub objective: f64,

    /// Euclidean norm of the gradient at the accepted point.
    pub gradient_norm: f64,

    /// Step length the line search accepted, zero before the first step.
    pub step: f64,
}
