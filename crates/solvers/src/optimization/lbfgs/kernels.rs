//! Strided vector kernels.
//!
//! Views follow the BLAS convention: with a negative stride the `n` elements
//! are visited from the far end of the view back towards `offset`, so that
//! element `i` lives at `offset + (n - 1 - i) * |stride|`.

/// A read-only view of `n` elements at `offset`, `stride` apart.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Strided<'a> {
    data: &'a [f64],
    offset: usize,
    stride: isize,
}

/// A mutable view of `n` elements at `offset`, `stride` apart.
#[derive(Debug)]
pub(crate) struct StridedMut<'a> {
    data: &'a mut [f64],
    offset: usize,
    stride: isize,
}

impl<'a> Strided<'a> {
    pub(crate) fn new(data: &'a [f64], offset: usize, stride: isize) -> Self {
        Self {
            data,
            offset,
            stride,
        }
    }

    fn get(&self, i: usize, n: usize) -> f64 {
        self.data[index(self.offset, self.stride, i, n)]
    }
}

impl<'a> From<&'a [f64]> for Strided<'a> {
    fn from(data: &'a [f64]) -> Self {
        Self::new(data, 0, 1)
    }
}

impl<'a> From<&'a Vec<f64>> for Strided<'a> {
    fn from(data: &'a Vec<f64>) -> Self {
        Self::new(data, 0, 1)
    }
}

impl<'a> StridedMut<'a> {
    pub(crate) fn new(data: &'a mut [f64], offset: usize, stride: isize) -> Self {
        Self {
            data,
            offset,
            stride,
        }
    }

    fn get_mut(&mut self, i: usize, n: usize) -> &mut f64 {
        &mut self.data[index(self.offset, self.stride, i, n)]
    }
}

impl<'a> From<&'a mut [f64]> for StridedMut<'a> {
    fn from(data: &'a mut [f64]) -> Self {
        Self::new(data, 0, 1)
    }
}

impl<'a> From<&'a mut Vec<f64>> for StridedMut<'a> {
    fn from(data: &'a mut Vec<f64>) -> Self {
        Self::new(data, 0, 1)
    }
}

fn index(offset: usize, stride: isize, i: usize, n: usize) -> usize {
    let step = stride.unsigned_abs();
    if stride < 0 {
        offset + (n - 1 - i) * step
    } else {
        offset + i * step
    }
}

/// Returns the dot product of the first `n` elements of `x` and `y`.
pub(crate) fn dot<'x, 'y>(n: usize, x: impl Into<Strided<'x>>, y: impl Into<Strided<'y>>) -> f64 {
    let (x, y) = (x.into(), y.into());
    (0..n).map(|i| x.get(i, n) * y.get(i, n)).sum()
}

/// Computes `y ← y + alpha·x` over the first `n` elements.
#[allow(clippy::float_cmp)]
pub(crate) fn axpy<'x, 'y>(
    n: usize,
    alpha: f64,
    x: impl Into<Strided<'x>>,
    y: impl Into<StridedMut<'y>>,
) {
    if n == 0 || alpha == 0.0 {
        return;
    }
    let (x, mut y) = (x.into(), y.into());
    for i in 0..n {
        *y.get_mut(i, n) += alpha * x.get(i, n);
    }
}

/// Returns the Euclidean norm of `x`.
pub(crate) fn norm(x: &[f64]) -> f64 {
    dot(x.len(), x, x).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn contiguous_dot() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, -5.0, 6.0];

        assert_relative_eq!(dot(3, &x[..], &y[..]), 12.0);
    }

    #[test]
    fn offset_and_stride_select_a_slot() {
        // Two slots of length 2 packed into one buffer.
        let packed = [1.0, 2.0, 10.0, 20.0];
        let ones = [1.0, 1.0];

        let second = Strided::new(&packed, 2, 1);
        assert_relative_eq!(dot(2, second, &ones[..]), 30.0);

        let evens = Strided::new(&packed, 0, 2);
        assert_relative_eq!(dot(2, evens, &ones[..]), 11.0);
    }

    #[test]
    fn negative_stride_walks_backwards() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 10.0, 100.0];

        // Reversed x pairs 3 with 1, 2 with 10, 1 with 100.
        let reversed = Strided::new(&x, 0, -1);
        assert_relative_eq!(dot(3, reversed, &y[..]), 123.0);
    }

    #[test]
    fn axpy_accumulates_in_place() {
        let x = [1.0, 2.0, 3.0];
        let mut y = vec![1.0, 1.0, 1.0];

        axpy(3, 2.0, &x[..], &mut y);

        assert_eq!(y, vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn axpy_into_strided_slot() {
        let x = [1.0, 2.0];
        let mut packed = [0.0; 4];

        axpy(2, -1.0, &x[..], StridedMut::new(&mut packed, 1, 2));
        assert_eq!(packed, [0.0, -1.0, 0.0, -2.0]);

        axpy(2, 1.0, &x[..], StridedMut::new(&mut packed, 0, -2));
        assert_eq!(packed, [2.0, -1.0, 1.0, -2.0]);
    }

    #[test]
    fn zero_alpha_leaves_y_untouched() {
        let x = [f64::NAN];
        let mut y = vec![1.0];

        axpy(1, 0.0, &x[..], &mut y);

        assert_eq!(y, vec![1.0]);
    }

    #[test]
    fn norm_of_pythagorean_pair() {
        assert_relative_eq!(norm(&[3.0, 4.0]), 5.0);
    }
}
