use std::error::Error as StdError;

use thiserror::Error;

use crate::optimization::EvalError;

use super::{
    config::ParameterError, guarded::NumericOverflow, line_search::LineSearchFailure,
    mcstep::BracketError,
};

/// Errors that can occur during an L-BFGS run.
///
/// Every error is fatal to the run that produced it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("diagonal entry {index} is {value}, must be finite and positive")]
    NonPositiveDiagonal { index: usize, value: f64 },

    #[error("search direction is not a descent direction (g·d = {slope})")]
    NotDescentDirection { slope: f64 },

    #[error("evaluation at step {step} is not finite (f = {value}, g·d = {slope})")]
    NonFiniteEvaluation { step: f64, value: f64, slope: f64 },

    #[error("numeric overflow: {0}")]
    NumericOverflow(#[from] NumericOverflow),

    #[error("line search failed: {0}")]
    LineSearchFailure(#[from] LineSearchFailure),

    #[error("inconsistent line search bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("reply does not answer the pending {expected} request")]
    UnexpectedReply { expected: &'static str },

    #[error("the run has already terminated")]
    Terminated,

    #[error("model call failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::problem(e),
        }
    }
}
