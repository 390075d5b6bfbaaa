//! Numerical solvers for the Descent framework.
//!
//! # Modules
//!
//! - [`optimization`] — gradient-based minimization, currently the
//!   limited-memory BFGS solver with a Moré–Thuente line search

pub mod optimization;
