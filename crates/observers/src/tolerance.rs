use descent_core::Observer;

use crate::traits::{CanStopEarly, HasGradientNorm, HasIteration};

/// Stops a run once the gradient norm drops below an absolute tolerance.
///
/// Solvers usually test a relative gradient. This observer adds an absolute
/// test, skipped until `min_iters` iterations have completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientTolerance {
    tolerance: f64,
    min_iters: usize,
}

impl GradientTolerance {
    /// Creates an observer that stops once `‖g‖ < tolerance`.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            min_iters: 0,
        }
    }

    /// Skips the test until `min_iters` iterations have completed.
    #[must_use]
    pub fn min_iters(mut self, min_iters: usize) -> Self {
        self.min_iters = min_iters;
        self
    }
}

impl<E, A> Observer<E, A> for GradientTolerance
where
    E: HasIteration + HasGradientNorm,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.iteration() >= self.min_iters && event.gradient_norm() < self.tolerance)
            .then(A::stop_early)
    }
}
