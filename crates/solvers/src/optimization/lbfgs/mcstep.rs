//! Safeguarded cubic/quadratic step selection for the Moré–Thuente search.
//!
//! Given the best step so far, the other end of the interval of uncertainty,
//! and a new trial step (each with function value and directional
//! derivative), [`safeguarded_step`] picks the next trial step by cubic or
//! secant interpolation and updates the interval. It is a pure function.

use thiserror::Error;

/// Interpolation is clipped to this fraction of the bracket when the case
/// calls for a bound.
const BOUND_FRACTION: f64 = 0.66;

/// A step with its function value and directional derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Endpoint {
    pub(crate) step: f64,
    pub(crate) value: f64,
    pub(crate) slope: f64,
}

impl Endpoint {
    pub(crate) fn new(step: f64, value: f64, slope: f64) -> Self {
        Self { step, value, slope }
    }
}

/// Interval of uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Interval {
    /// Step with the lowest function value so far (`stx`).
    pub(crate) best: Endpoint,

    /// Other endpoint of the interval (`sty`).
    pub(crate) other: Endpoint,

    /// Whether a minimizer is known to lie between the endpoints.
    pub(crate) bracketed: bool,
}

/// Which interpolation rule produced a trial step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// The trial has a higher function value than the best step.
    HigherValue = 1,

    /// The derivatives at the best and trial steps have opposite signs.
    OppositeSlopes = 2,

    /// Same-sign derivatives with the magnitude decreasing.
    ShrinkingSlope = 3,

    /// Same-sign derivatives with the magnitude not decreasing.
    NonShrinkingSlope = 4,
}

impl Case {
    /// Returns the classic MINPACK `info` code for this case.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Result of one safeguarded step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Update {
    pub(crate) interval: Interval,
    pub(crate) step: f64,
    pub(crate) case: Case,
}

/// Inputs to the safeguarded step are inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BracketError {
    #[error("trial step {step} lies outside the bracket [{lower}, {upper}]")]
    TrialOutsideBracket { step: f64, lower: f64, upper: f64 },

    #[error("slope {slope} at the best step does not decrease towards the trial step")]
    NotDescending { slope: f64 },

    #[error("step bounds are inverted: [{lower}, {upper}]")]
    InvertedBounds { lower: f64, upper: f64 },
}

/// Computes the next trial step and updates the interval of uncertainty.
///
/// `bounds` limits the returned step to `[lower, upper]`.
///
/// # Errors
///
/// Returns a [`BracketError`] if the trial lies outside a known bracket, the
/// best step's derivative does not point towards the trial, or the bounds
/// are inverted.
pub(crate) fn safeguarded_step(
    interval: Interval,
    trial: Endpoint,
    bounds: [f64; 2],
) -> Result<Update, BracketError> {
    let Interval {
        best: x,
        other: y,
        mut bracketed,
    } = interval;
    let [lower, upper] = bounds;

    if bracketed {
        let (lo, hi) = (x.step.min(y.step), x.step.max(y.step));
        if trial.step <= lo || trial.step >= hi {
            return Err(BracketError::TrialOutsideBracket {
                step: trial.step,
                lower: lo,
                upper: hi,
            });
        }
    }
    if x.slope * (trial.step - x.step) >= 0.0 {
        return Err(BracketError::NotDescending { slope: x.slope });
    }
    if upper < lower {
        return Err(BracketError::InvertedBounds { lower, upper });
    }

    let opposite = trial.slope * x.slope.signum() < 0.0;

    let (case, next, bound) = if trial.value > x.value {
        bracketed = true;
        (Case::HigherValue, higher_value(x, trial), true)
    } else if opposite {
        bracketed = true;
        (Case::OppositeSlopes, opposite_slopes(x, trial), false)
    } else if trial.slope.abs() < x.slope.abs() {
        let next = shrinking_slope(x, trial, bracketed, bounds);
        (Case::ShrinkingSlope, next, true)
    } else {
        let next = if bracketed {
            cubic_minimizer(trial, y)
        } else if trial.step > x.step {
            upper
        } else {
            lower
        };
        (Case::NonShrinkingSlope, next, false)
    };

    let (best, other) = if trial.value > x.value {
        (x, trial)
    } else if opposite {
        (trial, x)
    } else {
        (trial, y)
    };

    let mut step = next.min(upper).max(lower);
    if bracketed && bound {
        let limit = best.step + BOUND_FRACTION * (other.step - best.step);
        step = if other.step > best.step {
            limit.min(step)
        } else {
            limit.max(step)
        };
    }

    Ok(Update {
        interval: Interval {
            best,
            other,
            bracketed,
        },
        step,
        case,
    })
}

/// Case 1: take the cubic step if it is closer to `x`, otherwise the average
/// of the cubic and secant steps.
fn higher_value(x: Endpoint, p: Endpoint) -> f64 {
    let theta = 3.0 * (x.value - p.value) / (p.step - x.step) + x.slope + p.slope;
    let s = theta.abs().max(x.slope.abs()).max(p.slope.abs());
    let mut gamma = s * ((theta / s).powi(2) - (x.slope / s) * (p.slope / s)).sqrt();
    if p.step < x.step {
        gamma = -gamma;
    }
    let num = (gamma - x.slope) + theta;
    let den = ((gamma - x.slope) + gamma) + p.slope;
    let cubic = x.step + (num / den) * (p.step - x.step);
    let secant = x.step
        + ((x.slope / ((x.value - p.value) / (p.step - x.step) + x.slope)) / 2.0)
            * (p.step - x.step);

    if (cubic - x.step).abs() < (secant - x.step).abs() {
        cubic
    } else {
        cubic + (secant - cubic) / 2.0
    }
}

/// Case 2: take whichever of the cubic and secant steps is farther from `p`.
fn opposite_slopes(x: Endpoint, p: Endpoint) -> f64 {
    let cubic = cubic_minimizer(p, x);
    let secant = p.step + (p.slope / (p.slope - x.slope)) * (x.step - p.step);

    if (cubic - p.step).abs() > (secant - p.step).abs() {
        cubic
    } else {
        secant
    }
}

/// Case 3: the cubic step is used only if the cubic tends to infinity in the
/// direction of the step and its minimizer lies beyond `p`. Within a bracket
/// the step nearer `p` wins, otherwise the farther one.
#[allow(clippy::float_cmp)]
fn shrinking_slope(x: Endpoint, p: Endpoint, bracketed: bool, bounds: [f64; 2]) -> f64 {
    let theta = 3.0 * (x.value - p.value) / (p.step - x.step) + x.slope + p.slope;
    let s = theta.abs().max(x.slope.abs()).max(p.slope.abs());
    let mut gamma = s * ((theta / s).powi(2) - (x.slope / s) * (p.slope / s)).max(0.0).sqrt();
    if p.step > x.step {
        gamma = -gamma;
    }
    let num = (gamma - p.slope) + theta;
    let den = (gamma + (x.slope - p.slope)) + gamma;
    let r = num / den;

    let cubic = if r < 0.0 && gamma != 0.0 {
        p.step + r * (x.step - p.step)
    } else if p.step > x.step {
        bounds[1]
    } else {
        bounds[0]
    };
    let secant = p.step + (p.slope / (p.slope - x.slope)) * (x.step - p.step);

    let (to_cubic, to_secant) = ((p.step - cubic).abs(), (p.step - secant).abs());
    let take_cubic = if bracketed {
        to_cubic < to_secant
    } else {
        to_cubic > to_secant
    };
    if take_cubic { cubic } else { secant }
}

/// Minimizer of the cubic through `p` and `q`, measured from `p`.
fn cubic_minimizer(p: Endpoint, q: Endpoint) -> f64 {
    let theta = 3.0 * (q.value - p.value) / (p.step - q.step) + q.slope + p.slope;
    let s = theta.abs().max(q.slope.abs()).max(p.slope.abs());
    let mut gamma = s * ((theta / s).powi(2) - (q.slope / s) * (p.slope / s)).sqrt();
    if p.step > q.step {
        gamma = -gamma;
    }
    let num = (gamma - p.slope) + theta;
    let den = ((gamma - p.slope) + gamma) + q.slope;
    p.step + (num / den) * (q.step - p.step)
}
