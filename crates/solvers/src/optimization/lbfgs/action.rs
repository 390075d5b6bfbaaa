/// Actions an observer can take during an L-BFGS run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the last accepted point.
    StopEarly,
}
