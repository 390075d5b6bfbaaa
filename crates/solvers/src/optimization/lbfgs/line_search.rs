//! Moré–Thuente line search as a resumable state machine.
//!
//! The search never evaluates the objective itself. Each call to
//! [`LineSearch::advance`] consumes the function value and gradient at the
//! point currently held in `x`, and either writes the next trial point into
//! `x` and returns [`Outcome::Evaluate`], or finishes.
//!
//! # Protocol
//!
//! 1. Create the search with [`LineSearch::new`] and an initial step.
//! 2. Call `advance` with the base point in `x` and `f`, `g` evaluated there.
//! 3. While it returns [`Outcome::Evaluate`], evaluate `f` and `g` at `x` and
//!    call `advance` again.
//! 4. [`Outcome::Converged`] means `x` satisfies the sufficient decrease and
//!    curvature conditions; the last `f` and `g` belong to it.
//!
//! A non-descent direction is rejected on the first call before any trial
//! point is written.

use thiserror::Error;

use super::{
    Error,
    config::{Config, ParameterError},
    guarded::safe_multiply,
    kernels::dot,
    mcstep::{Case, Endpoint, Interval, safeguarded_step},
};

/// Factor by which the step may grow while the minimizer is not bracketed.
const EXTRAPOLATION: f64 = 4.0;

/// Required shrink of the bracket width over two iterations before
/// bisection is forced.
const SHRINK: f64 = 0.66;

/// Parameters of the line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Sufficient decrease (Armijo) parameter.
    pub ftol: f64,

    /// Curvature parameter.
    pub gtol: f64,

    /// Relative bracket width at which the search gives up.
    pub xtol: f64,

    /// Lower bound for the step.
    pub stpmin: f64,

    /// Upper bound for the step.
    pub stpmax: f64,

    /// Function evaluations allowed.
    pub maxfev: usize,
}

impl Default for Params {
    fn default() -> Self {
        Config::default().line_search()
    }
}

impl Params {
    /// Validates tolerances, step bounds, and the evaluation budget.
    ///
    /// # Errors
    ///
    /// Returns the first constraint that is violated.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in [("ftol", self.ftol), ("gtol", self.gtol), ("xtol", self.xtol)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParameterError::Tolerance { name, value });
            }
        }
        let bounds_ok = self.stpmin.is_finite()
            && self.stpmax.is_finite()
            && self.stpmin >= 0.0
            && self.stpmin <= self.stpmax;
        if !bounds_ok {
            return Err(ParameterError::StepBounds {
                stpmin: self.stpmin,
                stpmax: self.stpmax,
            });
        }
        if self.maxfev == 0 {
            return Err(ParameterError::ZeroMaxEvaluations);
        }
        Ok(())
    }
}

/// Ways a line search can stop without satisfying both conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineSearchFailure {
    #[error("relative width of the interval of uncertainty is at most xtol")]
    XtolReached,

    #[error("number of function evaluations reached maxfev")]
    MaxFevExceeded,

    #[error("step is at the lower bound stpmin")]
    AtLowerBound,

    #[error("step is at the upper bound stpmax")]
    AtUpperBound,

    #[error("rounding errors prevent further progress")]
    RoundingNoProgress,
}

impl LineSearchFailure {
    /// Returns the classic MINPACK `info` code for this status.
    ///
    /// Convergence is code 1; invalid input, which is rejected before the
    /// search starts, is code 0.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::XtolReached => 2,
            Self::MaxFevExceeded => 3,
            Self::AtLowerBound => 4,
            Self::AtUpperBound => 5,
            Self::RoundingNoProgress => 6,
        }
    }
}

/// What the caller should do after a successful [`LineSearch::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Evaluate `f` and `g` at the trial point now held in `x`.
    Evaluate,

    /// The point in `x` satisfies both conditions at this step length.
    Converged { step: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Init,
    AwaitingEvaluation,
    Converged,
    Failed,
}

/// State of one Moré–Thuente line search.
#[derive(Debug, Clone)]
pub struct LineSearch {
    params: Params,
    phase: Phase,
    step: f64,
    base: Vec<f64>,
    finit: f64,
    dginit: f64,
    dgtest: f64,
    interval: Interval,
    stmin: f64,
    stmax: f64,
    width: f64,
    prev_width: f64,
    evaluations: usize,
    stage1: bool,
    case: Option<Case>,
}

impl LineSearch {
    /// Creates a search that will first try `step`.
    #[must_use]
    pub fn new(params: Params, step: f64) -> Self {
        let origin = Endpoint::new(0.0, 0.0, 0.0);
        Self {
            params,
            phase: Phase::Init,
            step,
            base: Vec::new(),
            finit: 0.0,
            dginit: 0.0,
            dgtest: 0.0,
            interval: Interval {
                best: origin,
                other: origin,
                bracketed: false,
            },
            stmin: 0.0,
            stmax: 0.0,
            width: 0.0,
            prev_width: 0.0,
            evaluations: 0,
            stage1: true,
            case: None,
        }
    }

    /// Current trial step.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Function evaluations consumed by this search.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Interpolation rule that produced the current trial step, if any.
    #[must_use]
    pub fn last_case(&self) -> Option<Case> {
        self.case
    }

    /// Whether the interval of uncertainty brackets a minimizer.
    #[must_use]
    pub fn is_bracketed(&self) -> bool {
        self.interval.bracketed
    }

    /// Advances the search with `f` and `g` evaluated at `x`.
    ///
    /// On the first call `x` is the base point. `direction` must be the same
    /// on every call.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameters`] for bad parameters or mismatched lengths
    /// - [`Error::NotDescentDirection`] if `g·direction >= 0` on the first call
    /// - [`Error::NonFiniteEvaluation`] if `f` or `g·direction` is NaN or infinite
    /// - [`Error::LineSearchFailure`] if the search stops without converging
    /// - [`Error::NumericOverflow`] if `step·direction` overflows
    /// - [`Error::InvalidBracket`] if interpolation receives an inconsistent bracket
    /// - [`Error::Terminated`] if the search has already finished
    pub fn advance(
        &mut self,
        x: &mut [f64],
        f: f64,
        g: &[f64],
        direction: &[f64],
    ) -> Result<Outcome, Error> {
        let result = match self.phase {
            Phase::Init => self.begin(x, f, g, direction),
            Phase::AwaitingEvaluation => self.resume(x, f, g, direction),
            Phase::Converged | Phase::Failed => return Err(Error::Terminated),
        };
        if result.is_err() {
            self.phase = Phase::Failed;
        }
        result
    }

    fn begin(
        &mut self,
        x: &mut [f64],
        f: f64,
        g: &[f64],
        direction: &[f64],
    ) -> Result<Outcome, Error> {
        if x.is_empty() {
            return Err(ParameterError::EmptyPoint.into());
        }
        check_len(x.len(), g.len())?;
        check_len(x.len(), direction.len())?;
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ParameterError::InitialStep(self.step).into());
        }
        self.params.validate()?;

        let dginit = dot(x.len(), g, direction);
        check_finite(0.0, f, dginit)?;
        if dginit >= 0.0 {
            return Err(Error::NotDescentDirection { slope: dginit });
        }

        let origin = Endpoint::new(0.0, f, dginit);
        self.finit = f;
        self.dginit = dginit;
        self.dgtest = self.params.ftol * dginit;
        self.width = self.params.stpmax - self.params.stpmin;
        self.prev_width = self.width / 0.5;
        self.interval = Interval {
            best: origin,
            other: origin,
            bracketed: false,
        };
        self.stage1 = true;
        self.evaluations = 0;
        self.base.clear();
        self.base.extend_from_slice(x);

        self.propose(x, direction)
    }

    #[allow(clippy::float_cmp)]
    fn resume(
        &mut self,
        x: &mut [f64],
        f: f64,
        g: &[f64],
        direction: &[f64],
    ) -> Result<Outcome, Error> {
        check_len(self.base.len(), x.len())?;
        check_len(self.base.len(), g.len())?;
        check_len(self.base.len(), direction.len())?;

        let Params {
            ftol,
            gtol,
            xtol,
            stpmin,
            stpmax,
            maxfev,
        } = self.params;
        let stp = self.step;
        self.evaluations += 1;

        let dg = dot(x.len(), g, direction);
        check_finite(stp, f, dg)?;
        let ftest1 = self.finit + stp * self.dgtest;
        let bracketed = self.interval.bracketed;

        if f <= ftest1 && dg.abs() <= gtol * (-self.dginit) {
            self.phase = Phase::Converged;
            return Ok(Outcome::Converged { step: stp });
        }
        let failure = if bracketed && self.stmax - self.stmin <= xtol * self.stmax {
            Some(LineSearchFailure::XtolReached)
        } else if self.evaluations >= maxfev {
            Some(LineSearchFailure::MaxFevExceeded)
        } else if stp == stpmin && (f > ftest1 || dg >= self.dgtest) {
            Some(LineSearchFailure::AtLowerBound)
        } else if stp == stpmax && f <= ftest1 && dg <= self.dgtest {
            Some(LineSearchFailure::AtUpperBound)
        } else if bracketed && (stp <= self.stmin || stp >= self.stmax) {
            Some(LineSearchFailure::RoundingNoProgress)
        } else {
            None
        };
        if let Some(failure) = failure {
            return Err(failure.into());
        }

        // Switch to the plain function once the modified one has a
        // nonpositive value and nonnegative derivative.
        if self.stage1 && f <= ftest1 && dg >= ftol.min(gtol) * self.dginit {
            self.stage1 = false;
        }

        let trial = Endpoint::new(stp, f, dg);
        let bounds = [self.stmin, self.stmax];
        let update = if self.stage1 && f <= self.interval.best.value && f > ftest1 {
            let dgtest = self.dgtest;
            let modified = Interval {
                best: modify(self.interval.best, dgtest),
                other: modify(self.interval.other, dgtest),
                ..self.interval
            };
            let mut update = safeguarded_step(modified, modify(trial, dgtest), bounds)?;
            update.interval.best = restore(update.interval.best, dgtest);
            update.interval.other = restore(update.interval.other, dgtest);
            update
        } else {
            safeguarded_step(self.interval, trial, bounds)?
        };

        self.interval = update.interval;
        self.step = update.step;
        self.case = Some(update.case);

        if self.interval.bracketed {
            let (stx, sty) = (self.interval.best.step, self.interval.other.step);
            if (sty - stx).abs() >= SHRINK * self.prev_width {
                self.step = stx + 0.5 * (sty - stx);
            }
            self.prev_width = self.width;
            self.width = (sty - stx).abs();
        }

        self.propose(x, direction)
    }

    /// Safeguards the current step and writes its trial point into `x`.
    fn propose(&mut self, x: &mut [f64], direction: &[f64]) -> Result<Outcome, Error> {
        let Params {
            xtol,
            stpmin,
            stpmax,
            maxfev,
            ..
        } = self.params;
        let stx = self.interval.best.step;

        if self.interval.bracketed {
            self.stmin = stx.min(self.interval.other.step);
            self.stmax = stx.max(self.interval.other.step);
        } else {
            self.stmin = stx;
            self.stmax = self.step + EXTRAPOLATION * (self.step - stx);
        }

        self.step = self.step.max(stpmin).min(stpmax);

        // If the search is about to stop abnormally, evaluate the best step
        // found so far instead.
        let bracketed = self.interval.bracketed;
        if (bracketed && (self.step <= self.stmin || self.step >= self.stmax))
            || self.evaluations + 1 >= maxfev
            || (bracketed && self.stmax - self.stmin <= xtol * self.stmax)
        {
            self.step = stx.max(stpmin);
        }

        for ((xi, bi), di) in x.iter_mut().zip(&self.base).zip(direction) {
            *xi = bi + safe_multiply(self.step, *di)?;
        }

        self.phase = Phase::AwaitingEvaluation;
        Ok(Outcome::Evaluate)
    }
}

/// Shifts an endpoint onto the modified function `f(α) - α·dgtest`.
fn modify(e: Endpoint, dgtest: f64) -> Endpoint {
    Endpoint::new(e.step, e.value - e.step * dgtest, e.slope - dgtest)
}

/// Inverse of [`modify`].
fn restore(e: Endpoint, dgtest: f64) -> Endpoint {
    Endpoint::new(e.step, e.value + e.step * dgtest, e.slope + dgtest)
}

/// Rejects a non-finite value or slope before it enters the bracket.
fn check_finite(step: f64, value: f64, slope: f64) -> Result<(), Error> {
    if value.is_finite() && slope.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFiniteEvaluation { step, value, slope })
    }
}

pub(super) fn check_len(expected: usize, found: usize) -> Result<(), ParameterError> {
    if expected == found {
        Ok(())
    } else {
        Err(ParameterError::DimensionMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::optimization::lbfgs::Operation;

    /// Drives a one-dimensional search to completion, recording trial steps.
    fn run<F>(
        objective: F,
        x0: f64,
        direction: f64,
        params: Params,
        step: f64,
    ) -> (Result<f64, Error>, Vec<f64>, f64)
    where
        F: Fn(f64) -> (f64, f64),
    {
        let mut search = LineSearch::new(params, step);
        let mut x = [x0];
        let (mut f, g) = objective(x0);
        let mut g = [g];
        let mut trials = Vec::new();

        loop {
            match search.advance(&mut x, f, &g, &[direction]) {
                Ok(Outcome::Evaluate) => {
                    trials.push((x[0] - x0) / direction);
                    let (fx, gx) = objective(x[0]);
                    f = fx;
                    g = [gx];
                }
                Ok(Outcome::Converged { step }) => return (Ok(step), trials, x[0]),
                Err(e) => return (Err(e), trials, x[0]),
            }
        }
    }

    fn shifted_square(x: f64) -> (f64, f64) {
        ((x - 2.0).powi(2), 2.0 * (x - 2.0))
    }

    #[test]
    fn rejects_ascent_direction_without_evaluating() {
        let mut search = LineSearch::new(Params::default(), 1.0);
        let mut x = [0.0, 0.0];

        // g·d = 1 > 0
        let result = search.advance(&mut x, 1.0, &[1.0, 0.0], &[1.0, 1.0]);

        assert!(matches!(
            result,
            Err(Error::NotDescentDirection { slope }) if slope == 1.0
        ));
        assert_eq!(x, [0.0, 0.0]);
        assert_eq!(search.evaluations(), 0);
    }

    #[test]
    fn rejects_zero_slope() {
        let mut search = LineSearch::new(Params::default(), 1.0);
        let mut x = [0.0];

        let result = search.advance(&mut x, 1.0, &[0.0], &[1.0]);

        assert!(matches!(result, Err(Error::NotDescentDirection { .. })));
    }

    #[test]
    fn rejects_non_positive_initial_step() {
        let mut search = LineSearch::new(Params::default(), 0.0);
        let mut x = [0.0];

        let result = search.advance(&mut x, 4.0, &[-4.0], &[1.0]);

        assert!(matches!(
            result,
            Err(Error::InvalidParameters(ParameterError::InitialStep(_)))
        ));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let mut search = LineSearch::new(Params::default(), 1.0);
        let mut x = [0.0, 0.0];

        let result = search.advance(&mut x, 4.0, &[-4.0], &[1.0, 0.0]);

        assert!(matches!(
            result,
            Err(Error::InvalidParameters(ParameterError::DimensionMismatch {
                expected: 2,
                found: 1
            }))
        ));
    }

    #[test]
    fn exact_step_on_quadratic_converges_immediately() {
        let (result, trials, x) = run(shifted_square, 0.0, 1.0, Params::default(), 2.0);

        assert_relative_eq!(result.unwrap(), 2.0);
        assert_eq!(trials, vec![2.0]);
        assert_relative_eq!(x, 2.0);
    }

    #[test]
    fn converged_step_satisfies_wolfe_conditions() {
        let params = Params {
            gtol: 0.1,
            ..Params::default()
        };
        let objective = |x: f64| (x.powi(4) - 3.0 * x, 4.0 * x.powi(3) - 3.0);
        let (f0, g0) = objective(0.0);

        let (result, _, x) = run(objective, 0.0, 1.0, params, 5.0);
        let step = result.unwrap();

        let (f, g) = objective(x);
        assert!(f <= f0 + params.ftol * step * g0);
        assert!(g.abs() <= params.gtol * g0.abs());
    }

    #[test]
    fn short_first_step_extrapolates() {
        let (result, trials, _) = run(shifted_square, 0.0, 1.0, Params::default(), 0.01);

        assert!(result.is_ok());
        assert!(trials.len() > 1);
        assert!(trials.windows(2).take(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn short_step_with_shrinking_slope_is_unbracketed() {
        let mut search = LineSearch::new(Params::default(), 0.01);
        let mut x = [0.0];

        search.advance(&mut x, 4.0, &[-4.0], &[1.0]).unwrap();
        assert_eq!(search.last_case(), None);

        let (f, g) = shifted_square(x[0]);
        search.advance(&mut x, f, &[g], &[1.0]).unwrap();

        assert_eq!(search.last_case(), Some(Case::ShrinkingSlope));
        assert_eq!(Case::ShrinkingSlope.code(), 3);
        assert!(!search.is_bracketed());
        // Extrapolation is capped at five times the first step.
        assert_relative_eq!(search.step(), 0.05);
    }

    #[test]
    fn stops_at_upper_bound() {
        let params = Params {
            gtol: 0.1,
            stpmax: 0.5,
            ..Params::default()
        };

        let (result, trials, _) = run(shifted_square, 0.0, 1.0, params, 1.0);

        assert!(matches!(
            result,
            Err(Error::LineSearchFailure(LineSearchFailure::AtUpperBound))
        ));
        assert_eq!(trials, vec![0.5]);
        assert_eq!(LineSearchFailure::AtUpperBound.code(), 5);
    }

    #[test]
    fn stops_when_evaluations_run_out() {
        let params = Params {
            maxfev: 1,
            ..Params::default()
        };

        let (result, trials, _) = run(shifted_square, 0.0, 1.0, params, 1.0);

        assert!(matches!(
            result,
            Err(Error::LineSearchFailure(LineSearchFailure::MaxFevExceeded))
        ));
        assert_eq!(trials.len(), 1);
    }

    #[test]
    fn stops_at_lower_bound() {
        let params = Params {
            stpmin: 5.0,
            ..Params::default()
        };

        // The step is raised to stpmin, where f = 9 is above f(0) = 4.
        let (result, trials, _) = run(shifted_square, 0.0, 1.0, params, 1.0);

        assert!(matches!(
            result,
            Err(Error::LineSearchFailure(LineSearchFailure::AtLowerBound))
        ));
        assert_eq!(trials, vec![5.0]);
        assert_eq!(LineSearchFailure::AtLowerBound.code(), 4);
    }

    #[test]
    fn stops_when_bracket_is_within_xtol() {
        let params = Params {
            xtol: 1.0,
            ..Params::default()
        };

        // The first trial brackets [0, 10], which is already within xtol, so
        // the search falls back to the best step and stops there.
        let (result, trials, _) = run(shifted_square, 0.0, 1.0, params, 10.0);

        assert!(matches!(
            result,
            Err(Error::LineSearchFailure(LineSearchFailure::XtolReached))
        ));
        assert_eq!(trials, vec![10.0, params.stpmin]);
        assert_eq!(LineSearchFailure::XtolReached.code(), 2);
    }

    #[test]
    fn stops_when_rounding_prevents_progress() {
        let params = Params {
            maxfev: 50,
            ..Params::default()
        };
        // |g| = 1 everywhere, so the curvature condition never holds and the
        // bracket collapses onto the kink at x = 1.
        let kink = |x: f64| ((x - 1.0).abs(), if x > 1.0 { 1.0 } else { -1.0 });

        let (result, trials, _) = run(kink, 0.0, 1.0, params, 1.0);

        assert!(matches!(
            result,
            Err(Error::LineSearchFailure(LineSearchFailure::RoundingNoProgress))
        ));
        assert_eq!(trials.len(), 22);
        assert_eq!(trials.last(), Some(&1.0));
        assert!(trials.iter().all(|&t| t >= 1.0));
        assert_eq!(LineSearchFailure::RoundingNoProgress.code(), 6);
    }

    #[test]
    fn slow_bracket_shrink_forces_bisection() {
        let params = Params {
            gtol: 0.01,
            ..Params::default()
        };
        let objective = |x: f64| (-x.sin(), -x.cos());
        let mut search = LineSearch::new(params, 5.0);
        let mut x = [0.0];

        let (f, g) = objective(x[0]);
        search.advance(&mut x, f, &[g], &[1.0]).unwrap();

        // Trials at 5 (brackets [0, 5]), then about 1.08 and 1.50. The third
        // only shrinks the bracket to [1.50, 5], less than 0.66 of [0, 5].
        for _ in 0..3 {
            let (f, g) = objective(x[0]);
            let outcome = search.advance(&mut x, f, &[g], &[1.0]).unwrap();
            assert_eq!(outcome, Outcome::Evaluate);
        }

        let (stx, sty) = (search.interval.best.step, search.interval.other.step);
        assert_relative_eq!(stx, 1.502_270_866_234_897, epsilon = 1e-12);
        assert_eq!(sty, 5.0);
        assert_eq!(search.last_case(), Some(Case::ShrinkingSlope));
        // The cubic step near 1.57 is replaced by the midpoint.
        assert_eq!(search.step(), stx + 0.5 * (sty - stx));
        assert_eq!(x[0], search.step());

        let (f, g) = objective(x[0]);
        assert_eq!(
            search.advance(&mut x, f, &[g], &[1.0]).unwrap(),
            Outcome::Evaluate
        );
    }

    #[test]
    fn non_finite_trial_stops_the_search() {
        let cliff = |x: f64| {
            if x > 0.5 {
                (f64::NAN, f64::NAN)
            } else {
                shifted_square(x)
            }
        };

        let (result, trials, _) = run(cliff, 0.0, 1.0, Params::default(), 1.0);

        assert!(matches!(
            result,
            Err(Error::NonFiniteEvaluation { step, value, .. }) if step == 1.0 && value.is_nan()
        ));
        assert_eq!(trials, vec![1.0]);
    }

    #[test]
    fn rejects_non_finite_base_value() {
        let mut search = LineSearch::new(Params::default(), 1.0);
        let mut x = [0.0];

        let result = search.advance(&mut x, f64::INFINITY, &[-4.0], &[1.0]);

        assert!(matches!(result, Err(Error::NonFiniteEvaluation { .. })));
        assert_eq!(x, [0.0]);
        assert!(matches!(
            search.advance(&mut x, 4.0, &[-4.0], &[1.0]),
            Err(Error::Terminated)
        ));
    }

    #[test]
    fn overflowing_trial_point_fails() {
        let mut search = LineSearch::new(Params::default(), 1e10);
        let mut x = [0.0];

        // step·d = 1e10 · 1e300 overflows.
        let result = search.advance(&mut x, 0.0, &[-1.0], &[1e300]);

        assert!(matches!(
            result,
            Err(Error::NumericOverflow(overflow)) if overflow.operation == Operation::Multiply
        ));
    }

    #[test]
    fn trial_steps_stay_within_bounds() {
        let params = Params {
            stpmin: 1e-3,
            stpmax: 3.0,
            ..Params::default()
        };
        let objectives: [fn(f64) -> (f64, f64); 4] = [
            shifted_square,
            |x| (x.powi(4) - 3.0 * x, 4.0 * x.powi(3) - 3.0),
            |x| ((x - 10.0).powi(2), 2.0 * (x - 10.0)),
            |x| (-x.sin(), -x.cos()),
        ];

        for objective in objectives {
            for step in [1e-6, 0.5, 1.0, 2.5, 100.0] {
                let (_, trials, _) = run(objective, 0.0, 1.0, params, step);
                assert!(!trials.is_empty());
                for trial in trials {
                    assert!(
                        (params.stpmin..=params.stpmax).contains(&trial),
                        "trial {trial} outside bounds"
                    );
                }
            }
        }
    }

    #[test]
    fn finished_search_cannot_advance() {
        let mut search = LineSearch::new(Params::default(), 2.0);
        let mut x = [0.0];

        search.advance(&mut x, 4.0, &[-4.0], &[1.0]).unwrap();
        let outcome = search.advance(&mut x, 0.0, &[0.0], &[1.0]).unwrap();
        assert_eq!(outcome, Outcome::Converged { step: 2.0 });

        let result = search.advance(&mut x, 0.0, &[0.0], &[1.0]);
        assert!(matches!(result, Err(Error::Terminated)));
    }
}
