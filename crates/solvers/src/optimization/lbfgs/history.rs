use super::{
    guarded::{NumericOverflow, safe_divide},
    kernels::dot,
};

/// One curvature correction: the step taken and the gradient change it caused.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CorrectionPair {
    /// Step `s = x_{k+1} - x_k`.
    pub(crate) s: Vec<f64>,

    /// Gradient difference `y = g_{k+1} - g_k`.
    pub(crate) y: Vec<f64>,

    /// Curvature scale `1 / (y·s)`, or zero when `y·s` is exactly zero.
    pub(crate) rho: f64,
}

impl CorrectionPair {
    fn zeros(n: usize) -> Self {
        Self {
            s: vec![0.0; n],
            y: vec![0.0; n],
            rho: 0.0,
        }
    }

    /// Returns `y·s` for this pair.
    pub(crate) fn ys(&self) -> f64 {
        dot(self.s.len(), &self.s, &self.y)
    }

    /// Returns `y·y` for this pair.
    pub(crate) fn yy(&self) -> f64 {
        dot(self.y.len(), &self.y, &self.y)
    }
}

/// Fixed-capacity ring buffer of correction pairs.
///
/// All `m` slots are allocated up front; recording a pair overwrites the
/// slot at `point` in place, so the oldest pair is replaced once the buffer
/// is full.
#[derive(Debug, Clone)]
pub(crate) struct History {
    pairs: Vec<CorrectionPair>,
    point: usize,
    bound: usize,
}

impl History {
    /// Allocates `m` empty slots for pairs of dimension `n`.
    pub(crate) fn new(n: usize, m: usize) -> Self {
        Self {
            pairs: (0..m).map(|_| CorrectionPair::zeros(n)).collect(),
            point: 0,
            bound: 0,
        }
    }

    /// Number of valid corrections stored.
    pub(crate) fn bound(&self) -> usize {
        self.bound
    }

    /// Slot the next correction will be written to.
    #[cfg(test)]
    pub(crate) fn point(&self) -> usize {
        self.point
    }

    /// Stores the step `s` and gradient difference `y` in the next slot.
    ///
    /// `write` fills the slot's `s` and `y` vectors in place and returns
    /// any error it encounters. The cursor is left unchanged on failure,
    /// including when `1 / (y·s)` overflows.
    #[allow(clippy::float_cmp)]
    pub(crate) fn record<E>(
        &mut self,
        write: impl FnOnce(&mut [f64], &mut [f64]) -> Result<(), E>,
    ) -> Result<&CorrectionPair, E>
    where
        E: From<NumericOverflow>,
    {
        let slot = self.point;
        let pair = &mut self.pairs[slot];
        write(&mut pair.s, &mut pair.y)?;

        let ys = pair.ys();
        pair.rho = if ys == 0.0 { 0.0 } else { safe_divide(1.0, ys)? };

        self.point = (self.point + 1) % self.pairs.len();
        self.bound = (self.bound + 1).min(self.pairs.len());
        Ok(&self.pairs[slot])
    }

    /// Returns the most recently recorded pair, if any.
    pub(crate) fn newest(&self) -> Option<&CorrectionPair> {
        self.newest_first().next()
    }

    /// Iterates over the valid pairs from newest to oldest.
    pub(crate) fn newest_first(&self) -> impl Iterator<Item = &CorrectionPair> {
        let m = self.pairs.len();
        (0..self.bound).map(move |k| &self.pairs[(self.point + m - 1 - k) % m])
    }

    /// Iterates over the valid pairs from oldest to newest.
    pub(crate) fn oldest_first(&self) -> impl Iterator<Item = &CorrectionPair> {
        let m = self.pairs.len();
        (0..self.bound)
            .rev()
            .map(move |k| &self.pairs[(self.point + m - 1 - k) % m])
    }
}
