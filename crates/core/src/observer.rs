/// Watches a solver run and optionally steers it.
///
/// A solver hands each event to [`observe`](Self::observe) and acts on the
/// returned action, if any. `None` means carry on. The action type is
/// defined per solver, so an observer only compiles against solvers whose
/// actions it can produce.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never acts.
pub trait Observer<E, A> {
    /// Handles one event, returning the action the solver should take.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
