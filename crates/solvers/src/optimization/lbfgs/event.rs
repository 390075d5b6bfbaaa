use descent_core::Snapshot;

use super::Progress;

/// Event emitted by the L-BFGS driver after each accepted step.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Counters and values at the accepted point.
    pub progress: Progress,

    /// The accepted point.
    pub x: &'a [f64],

    /// Gradient at the accepted point.
    pub gradient: &'a [f64],

    /// Model input and output at the accepted point.
    pub snapshot: &'a Snapshot<I, O>,
}
