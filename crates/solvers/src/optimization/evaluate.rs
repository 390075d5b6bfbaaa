use thiserror::Error;

use descent_core::{MinimizationProblem, Model, Snapshot};

/// The result of evaluating a minimization problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O> {
    pub x: Vec<f64>,

    pub objective: f64,

    pub gradient: Vec<f64>,

    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating a minimization problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Failed to construct input or compute the objective or gradient.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output>,
    EvalError<<M as Model>::Error, <P as MinimizationProblem>::Error>,
>;

/// Evaluates the model in the context of a minimization problem.
///
/// This function maps `x` to model input, calls the model, then computes
/// the objective and gradient from the input and output.
///
/// # Errors
///
/// Returns an error if input mapping, model call, objective, or gradient
/// computation fails.
pub fn evaluate<M, P>(model: &M, problem: &P, x: &[f64]) -> EvaluateResult<M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    let input = problem.input(x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let objective = problem
        .objective(&input, &output)
        .map_err(EvalError::Problem)?;
    let gradient = problem
        .gradient(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x: x.to_vec(),
        objective,
        gradient,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;

    /// Sum of squares, with the output carrying the squared terms.
    struct Squares;

    impl Model for Squares {
        type Input = Vec<f64>;
        type Output = Vec<f64>;
        type Error = Infallible;

        fn call(&self, input: &Vec<f64>) -> Result<Vec<f64>, Self::Error> {
            Ok(input.iter().map(|x| x * x).collect())
        }
    }

    #[derive(Debug, Error)]
    #[error("negative input")]
    struct NegativeInput;

    struct SumOfSquares;

    impl MinimizationProblem for SumOfSquares {
        type Input = Vec<f64>;
        type Output = Vec<f64>;
        type Error = NegativeInput;

        fn input(&self, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
            if x.iter().any(|v| *v < 0.0) {
                return Err(NegativeInput);
            }
            Ok(x.to_vec())
        }

        fn objective(&self, _input: &Vec<f64>, output: &Vec<f64>) -> Result<f64, Self::Error> {
            Ok(output.iter().sum())
        }

        fn gradient(&self, input: &Vec<f64>, _output: &Vec<f64>) -> Result<Vec<f64>, Self::Error> {
            Ok(input.iter().map(|x| 2.0 * x).collect())
        }
    }

    #[test]
    fn evaluates_objective_and_gradient() {
        let eval = evaluate(&Squares, &SumOfSquares, &[1.0, 2.0]).unwrap();

        assert_eq!(eval.x, vec![1.0, 2.0]);
        assert_relative_eq!(eval.objective, 5.0);
        assert_eq!(eval.gradient, vec![2.0, 4.0]);
        assert_eq!(eval.snapshot.output, vec![1.0, 4.0]);
    }

    #[test]
    fn problem_failure_is_reported() {
        let result = evaluate(&Squares, &SumOfSquares, &[-1.0]);

        assert!(matches!(result, Err(EvalError::Problem(NegativeInput))));
    }
}
