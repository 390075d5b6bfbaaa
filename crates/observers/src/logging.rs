use descent_core::Observer;
use log::Level;

use crate::traits::{HasEvaluations, HasGradientNorm, HasIteration, HasObjective, HasStep};

/// An observer that logs each iteration through the [`log`] facade.
///
/// Records go to the `descent::iterations` target at [`Level::Info`] unless
/// another level is chosen. Each record holds the iteration and evaluation
/// counts, the objective, the gradient norm, and the accepted step length.
/// The observer never requests an action.
///
/// ```
/// use descent_observers::LogObserver;
/// use log::Level;
///
/// let observer = LogObserver::new().level(Level::Debug);
/// # let _ = observer;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogObserver {
    level: Level,
}

impl LogObserver {
    /// Target of every record this observer writes.
    pub const TARGET: &'static str = "descent::iterations";

    /// Creates an observer that logs at [`Level::Info`].
    #[must_use]
    pub fn new() -> Self {
        Self { level: Level::Info }
    }

    /// Sets the level records are written at.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> Observer<E, A> for LogObserver
where
    E: HasIteration + HasEvaluations + HasObjective + HasGradientNorm + HasStep,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        log::log!(
            target: Self::TARGET,
            self.level,
            "iter {:>4}  evals {:>5}  f = {:.6e}  |g| = {:.3e}  step = {:.3e}",
            event.iteration(),
            event.evaluations(),
            event.objective(),
            event.gradient_norm(),
            event.step(),
        );
        None
    }
}
