use thiserror::Error;

/// Configuration for the L-BFGS solver and its line search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct Config {
    /// Number of correction pairs kept (`m`).
    pub memory: usize,

    /// Convergence when `‖g‖ / max(1, ‖x‖) <= eps`.
    pub eps: f64,

    /// Relative width of the line search bracket below which it stops.
    pub xtol: f64,

    /// Sufficient decrease (Armijo) parameter.
    pub ftol: f64,

    /// Curvature parameter.
    pub gtol: f64,

    /// Smallest step the line search may take.
    pub stpmin: f64,

    /// Largest step the line search may take.
    pub stpmax: f64,

    /// Function evaluations allowed per line search.
    pub maxfev: usize,

    /// Outer iterations allowed by [`minimize`](super::minimize).
    pub max_iters: usize,

    /// Optional cap on the length of the first trial step of each search.
    pub max_step_norm: Option<f64>,
}

/// Errors from invalid solver parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("the starting point must have at least one variable")]
    EmptyPoint,

    #[error("memory must be at least one correction pair")]
    ZeroMemory,

    #[error("expected {expected} values, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("{name} must be finite and non-negative, got {value}")]
    Tolerance { name: &'static str, value: f64 },

    #[error("step bounds must satisfy 0 <= stpmin <= stpmax, got [{stpmin}, {stpmax}]")]
    StepBounds { stpmin: f64, stpmax: f64 },

    #[error("maxfev must be positive")]
    ZeroMaxEvaluations,

    #[error("initial step must be finite and positive, got {0}")]
    InitialStep(f64),

    #[error("max_step_norm must be finite and positive, got {0}")]
    MaxStepNorm(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory: 5,
            eps: 1e-5,
            xtol: 1e-16,
            ftol: 1e-4,
            gtol: 0.9,
            stpmin: 1e-20,
            stpmax: 1e20,
            maxfev: 20,
            max_iters: 1000,
            max_step_norm: None,
        }
    }
}

impl Config {
    /// Validates memory, tolerances, and step bounds.
    ///
    /// # Errors
    ///
    /// Returns the first constraint that is violated.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.memory == 0 {
            return Err(ParameterError::ZeroMemory);
        }
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(ParameterError::Tolerance {
                name: "eps",
                value: self.eps,
            });
        }
        self.line_search().validate()?;
        if let Some(norm) = self.max_step_norm {
            if !norm.is_finite() || norm <= 0.0 {
                return Err(ParameterError::MaxStepNorm(norm));
            }
        }
        Ok(())
    }

    /// Returns the line search parameters of this config.
    #[must_use]
    pub fn line_search(&self) -> super::line_search::Params {
        super::line_search::Params {
            ftol: self.ftol,
            gtol: self.gtol,
            xtol: self.xtol,
            stpmin: self.stpmin,
            stpmax: self.stpmax,
            maxfev: self.maxfev,
        }
    }
}
