use super::{
    Config, Error, Progress,
    config::ParameterError,
    guarded::{safe_divide, safe_multiply},
    history::History,
    kernels::norm,
    line_search::{LineSearch, Outcome, Params, check_len},
    two_loop::direction,
};

/// How the diagonal of the initial inverse Hessian is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagonal {
    /// Start from the identity and rescale by `y·s / y·y` every iteration.
    Scaled,

    /// Use a caller-supplied diagonal, refreshed on every [`Request::Diagonal`].
    Supplied(Vec<f64>),
}

/// Information the caller passes back into [`Lbfgs::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reply<'a> {
    /// Objective and gradient at [`Lbfgs::x`].
    Evaluation { f: f64, g: &'a [f64] },

    /// A new diagonal, answering [`Request::Diagonal`].
    Diagonal(&'a [f64]),
}

/// What the optimizer needs from the caller next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Evaluate the objective and gradient at [`Lbfgs::x`].
    Evaluate,

    /// Supply the diagonal to use for the next direction.
    Diagonal,

    /// The gradient test passed; [`Lbfgs::x`] is the minimizer.
    Converged,
}

#[derive(Debug)]
enum Phase {
    Start,
    Searching(LineSearch),
    AwaitingDiagonal,
    Converged,
    Failed,
}

/// L-BFGS optimizer driven by reverse communication.
///
/// The optimizer never evaluates the objective. Each call to
/// [`advance`](Self::advance) hands it the reply to its previous
/// [`Request`] and returns the next one. The first reply must be the
/// evaluation at the starting point.
///
/// ```
/// use descent_solvers::optimization::lbfgs::{Config, Diagonal, Lbfgs, Reply, Request};
///
/// let grad = |x: &[f64]| vec![2.0 * x[0], 8.0 * x[1]];
/// let f = |x: &[f64]| x[0] * x[0] + 4.0 * x[1] * x[1];
///
/// let x0 = vec![1.0, 1.0];
/// let mut lbfgs = Lbfgs::new(x0.clone(), &Config::default(), Diagonal::Scaled).unwrap();
/// let mut request = lbfgs.advance(Reply::Evaluation { f: f(&x0), g: &grad(&x0) }).unwrap();
///
/// while request == Request::Evaluate {
///     let x = lbfgs.x();
///     let (fx, gx) = (f(x), grad(x));
///     request = lbfgs.advance(Reply::Evaluation { f: fx, g: &gx }).unwrap();
/// }
///
/// assert_eq!(request, Request::Converged);
/// assert!(lbfgs.x().iter().all(|xi| xi.abs() < 1e-4));
/// ```
#[derive(Debug)]
pub struct Lbfgs {
    eps: f64,
    max_step_norm: Option<f64>,
    search_params: Params,
    supplied: bool,
    phase: Phase,
    x: Vec<f64>,
    f: f64,
    g: Vec<f64>,
    g_base: Vec<f64>,
    diag: Vec<f64>,
    direction: Vec<f64>,
    alpha: Vec<f64>,
    history: History,
    iterations: usize,
    evaluations: usize,
    gradient_norm: f64,
    step: f64,
}

impl Lbfgs {
    /// Creates an optimizer starting at `x0`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameters`] if `x0` is empty, the config is invalid,
    ///   or a supplied diagonal has the wrong length
    /// - [`Error::NonPositiveDiagonal`] if a supplied entry is not finite and
    ///   positive
    pub fn new(x0: Vec<f64>, config: &Config, diagonal: Diagonal) -> Result<Self, Error> {
        let n = x0.len();
        if n == 0 {
            return Err(ParameterError::EmptyPoint.into());
        }
        config.validate()?;

        let (supplied, diag) = match diagonal {
            Diagonal::Scaled => (false, vec![1.0; n]),
            Diagonal::Supplied(diag) => {
                check_diagonal(n, &diag)?;
                (true, diag)
            }
        };

        Ok(Self {
            eps: config.eps,
            max_step_norm: config.max_step_norm,
            search_params: config.line_search(),
            supplied,
            phase: Phase::Start,
            x: x0,
            f: f64::NAN,
            g: vec![0.0; n],
            g_base: vec![0.0; n],
            diag,
            direction: vec![0.0; n],
            alpha: Vec::with_capacity(config.memory),
            history: History::new(n, config.memory),
            iterations: 0,
            evaluations: 0,
            gradient_norm: f64::NAN,
            step: 0.0,
        })
    }

    /// The point the caller should evaluate, or the minimizer once converged.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Objective at the last accepted point.
    #[must_use]
    pub fn objective(&self) -> f64 {
        self.f
    }

    /// Gradient at the last accepted point.
    #[must_use]
    pub fn gradient(&self) -> &[f64] {
        &self.g
    }

    /// Current diagonal of the initial inverse Hessian.
    #[must_use]
    pub fn diagonal(&self) -> &[f64] {
        &self.diag
    }

    /// Current search direction.
    #[must_use]
    pub fn direction(&self) -> &[f64] {
        &self.direction
    }

    /// Number of correction pairs currently stored.
    #[must_use]
    pub fn corrections(&self) -> usize {
        self.history.bound()
    }

    /// Counters and values after the last accepted step.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            iteration: self.iterations,
            evaluations: self.evaluations,
            objective: self.f,
            gradient_norm: self.gradient_norm,
            step: self.step,
        }
    }

    /// Whether the run has converged or failed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Converged | Phase::Failed)
    }

    /// Feeds the reply to the previous request and returns the next request.
    ///
    /// # Errors
    ///
    /// Every error is fatal; later calls return [`Error::Terminated`].
    ///
    /// - [`Error::UnexpectedReply`] if `reply` does not answer the pending request
    /// - [`Error::InvalidParameters`] if a gradient or diagonal has the wrong length
    /// - [`Error::NonPositiveDiagonal`] if a diagonal entry is not finite and positive
    /// - [`Error::NotDescentDirection`], [`Error::NonFiniteEvaluation`],
    ///   [`Error::LineSearchFailure`], or [`Error::InvalidBracket`] from the line search
    /// - [`Error::NumericOverflow`] if guarded arithmetic on a step or a
    ///   correction pair overflows
    pub fn advance(&mut self, reply: Reply<'_>) -> Result<Request, Error> {
        let phase = std::mem::replace(&mut self.phase, Phase::Failed);
        match (phase, reply) {
            (Phase::Start, Reply::Evaluation { f, g }) => self.start(f, g),
            (Phase::Searching(search), Reply::Evaluation { f, g }) => self.resume(search, f, g),
            (Phase::AwaitingDiagonal, Reply::Diagonal(diag)) => {
                check_diagonal(self.x.len(), diag)?;
                self.diag.copy_from_slice(diag);
                self.next_search()
            }
            (Phase::Start | Phase::Searching(_), Reply::Diagonal(_)) => {
                Err(Error::UnexpectedReply {
                    expected: "evaluation",
                })
            }
            (Phase::AwaitingDiagonal, Reply::Evaluation { .. }) => Err(Error::UnexpectedReply {
                expected: "diagonal",
            }),
            (Phase::Converged, _) => {
                self.phase = Phase::Converged;
                Err(Error::Terminated)
            }
            (Phase::Failed, _) => Err(Error::Terminated),
        }
    }

    fn start(&mut self, f: f64, g: &[f64]) -> Result<Request, Error> {
        self.accept(f, g)?;
        self.evaluations = 1;
        if self.is_converged() {
            self.phase = Phase::Converged;
            return Ok(Request::Converged);
        }

        direction(
            &self.history,
            &self.g,
            &self.diag,
            &mut self.alpha,
            &mut self.direction,
        );
        let step = safe_divide(1.0, self.gradient_norm)?;
        self.begin_search(step)
    }

    fn resume(&mut self, mut search: LineSearch, f: f64, g: &[f64]) -> Result<Request, Error> {
        self.evaluations += 1;
        match search.advance(&mut self.x, f, g, &self.direction)? {
            Outcome::Evaluate => {
                self.phase = Phase::Searching(search);
                Ok(Request::Evaluate)
            }
            Outcome::Converged { step } => {
                self.accept(f, g)?;
                self.iterations += 1;
                self.step = step;
                self.record_correction(step)?;

                if self.is_converged() {
                    self.phase = Phase::Converged;
                    Ok(Request::Converged)
                } else if self.supplied {
                    self.phase = Phase::AwaitingDiagonal;
                    Ok(Request::Diagonal)
                } else {
                    self.scale_diagonal()?;
                    self.next_search()
                }
            }
        }
    }

    fn accept(&mut self, f: f64, g: &[f64]) -> Result<(), Error> {
        check_len(self.x.len(), g.len())?;
        self.f = f;
        self.g.copy_from_slice(g);
        self.gradient_norm = norm(&self.g);
        Ok(())
    }

    fn is_converged(&self) -> bool {
        self.gradient_norm / norm(&self.x).max(1.0) <= self.eps
    }

    /// Stores `s = step·d` and `y = g - g_base` from the accepted step.
    fn record_correction(&mut self, step: f64) -> Result<(), Error> {
        let Self {
            history,
            direction,
            g,
            g_base,
            ..
        } = self;
        history.record(|s, y| {
            for (si, di) in s.iter_mut().zip(direction.iter()) {
                *si = safe_multiply(step, *di)?;
            }
            for ((yi, gi), bi) in y.iter_mut().zip(g.iter()).zip(g_base.iter()) {
                *yi = gi - bi;
            }
            Ok::<_, Error>(())
        })?;
        Ok(())
    }

    /// Sets every diagonal entry to `y·s / y·y` from the newest pair.
    fn scale_diagonal(&mut self) -> Result<(), Error> {
        let Some(pair) = self.history.newest() else {
            return Ok(());
        };
        let scale = safe_divide(pair.ys(), pair.yy())?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::NonPositiveDiagonal {
                index: 0,
                value: scale,
            });
        }
        self.diag.fill(scale);
        Ok(())
    }

    fn next_search(&mut self) -> Result<Request, Error> {
        direction(
            &self.history,
            &self.g,
            &self.diag,
            &mut self.alpha,
            &mut self.direction,
        );
        self.begin_search(1.0)
    }

    fn begin_search(&mut self, mut step: f64) -> Result<Request, Error> {
        if let Some(max_norm) = self.max_step_norm {
            step = step.min(safe_divide(max_norm, norm(&self.direction))?);
        }

        self.g_base.copy_from_slice(&self.g);
        let mut search = LineSearch::new(self.search_params, step);
        match search.advance(&mut self.x, self.f, &self.g, &self.direction)? {
            Outcome::Evaluate => {
                self.phase = Phase::Searching(search);
                Ok(Request::Evaluate)
            }
            Outcome::Converged { .. } => Err(Error::Terminated),
        }
    }
}

fn check_diagonal(n: usize, diag: &[f64]) -> Result<(), Error> {
    check_len(n, diag.len())?;
    match diag
        .iter()
        .enumerate()
        .find(|(_, d)| !d.is_finite() || **d <= 0.0)
    {
        Some((index, &value)) => Err(Error::NonPositiveDiagonal { index, value }),
        None => Ok(()),
    }
}
