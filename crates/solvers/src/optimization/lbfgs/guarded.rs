//! Guarded scalar arithmetic.
//!
//! These two operations are the only places where the solver tolerates a
//! non-finite intermediate: a zero operand short-circuits the product, and
//! the `0 / 0` curvature ratio is defined as neutral scaling. Anything else
//! that overflows is reported as [`NumericOverflow`].

use thiserror::Error;

/// The arithmetic operation that produced a non-finite result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Multiply,
    Divide,
}

/// A guarded operation produced a non-finite result.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{operation:?} of {lhs} and {rhs} is not finite")]
pub struct NumericOverflow {
    pub operation: Operation,
    pub lhs: f64,
    pub rhs: f64,
}

/// Multiplies `a` by `b`, treating a zero operand as an exact zero.
///
/// # Errors
///
/// Returns [`NumericOverflow`] if both operands are non-zero and the product
/// is NaN or infinite.
#[allow(clippy::float_cmp)]
pub fn safe_multiply(a: f64, b: f64) -> Result<f64, NumericOverflow> {
    if a == 0.0 || b == 0.0 {
        return Ok(0.0);
    }

    let product = a * b;
    if product.is_finite() {
        Ok(product)
    } else {
        Err(NumericOverflow {
            operation: Operation::Multiply,
            lhs: a,
            rhs: b,
        })
    }
}

/// Divides `a` by `b`, defining `0 / 0` as one.
///
/// A zero divisor with a non-zero numerator yields the IEEE infinity rather
/// than an error; only a non-finite quotient from a non-zero divisor fails.
///
/// # Errors
///
/// Returns [`NumericOverflow`] if `b` is non-zero and the quotient is NaN or
/// infinite.
#[allow(clippy::float_cmp)]
pub fn safe_divide(a: f64, b: f64) -> Result<f64, NumericOverflow> {
    if a == 0.0 && b == 0.0 {
        return Ok(1.0);
    }

    let quotient = a / b;
    if quotient.is_finite() || b == 0.0 {
        Ok(quotient)
    } else {
        Err(NumericOverflow {
            operation: Operation::Divide,
            lhs: a,
            rhs: b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_over_zero_is_one() {
        assert_eq!(safe_divide(0.0, 0.0), Ok(1.0));
    }

    #[test]
    fn finite_division_is_exact() {
        assert_eq!(safe_divide(1.0, 3.0), Ok(1.0 / 3.0));
        assert_eq!(safe_divide(-7.5, 2.5), Ok(-3.0));
        assert_eq!(safe_divide(0.0, 4.0), Ok(0.0));
    }

    #[test]
    fn zero_divisor_yields_infinity() {
        assert_eq!(safe_divide(2.0, 0.0), Ok(f64::INFINITY));
        assert_eq!(safe_divide(-2.0, 0.0), Ok(f64::NEG_INFINITY));
    }

    #[test]
    fn overflowing_division_fails() {
        let err = safe_divide(f64::MAX, 0.5).unwrap_err();
        assert_eq!(err.operation, Operation::Divide);

        assert!(safe_divide(f64::NAN, 2.0).is_err());
    }

    #[test]
    fn zero_operand_wins_over_non_finite() {
        assert_eq!(safe_multiply(0.0, f64::NAN), Ok(0.0));
        assert_eq!(safe_multiply(f64::INFINITY, 0.0), Ok(0.0));
        assert_eq!(safe_multiply(-0.0, f64::NEG_INFINITY), Ok(0.0));
    }

    #[test]
    fn finite_product_is_exact() {
        assert_eq!(safe_multiply(1.5, -4.0), Ok(-6.0));
        assert_eq!(safe_multiply(0.1, 0.2), Ok(0.1 * 0.2));
    }

    #[test]
    fn overflowing_product_fails() {
        let err = safe_multiply(f64::MAX, 2.0).unwrap_err();
        assert_eq!(err.operation, Operation::Multiply);
        assert_eq!(err.lhs, f64::MAX);

        assert!(safe_multiply(f64::INFINITY, 1.0).is_err());
    }
}
