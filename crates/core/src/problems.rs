/// Defines a smooth minimization problem to be solved.
///
/// A minimization problem maps solver variables to a model input, then
/// computes an objective value and its gradient from the model input and
/// output. Gradient-based solvers search for the input that minimizes the
/// objective.
///
/// Unlike fixed-size problem traits, the number of solver variables is set
/// at runtime by the length of `x`. Every gradient returned must have the
/// same length as `x`.
pub trait MinimizationProblem {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64]) -> Result<Self::Input, Self::Error>;

    /// Computes an objective value from model input/output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be computed.
    fn objective(&self, input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error>;

    /// Computes the gradient of the objective with respect to `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the gradient cannot be computed.
    fn gradient(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<Vec<f64>, Self::Error>;

    /// Supplies the diagonal of an inverse Hessian approximation.
    ///
    /// Returning `Some` switches a quasi-Newton solver to caller-supplied
    /// preconditioning; every entry must be finite and positive. The default
    /// returns `None`, letting the solver scale the diagonal itself.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the diagonal cannot be computed.
    fn diagonal(
        &self,
        _input: &Self::Input,
        _output: &Self::Output,
    ) -> Result<Option<Vec<f64>>, Self::Error> {
        Ok(None)
    }
}
