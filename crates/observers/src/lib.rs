//! Reusable observers for the Descent framework.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across solvers in the Descent ecosystem.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasIteration`], [`HasObjective`], [`HasGradientNorm`], [`HasStep`],
//!   [`HasEvaluations`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] — writes one record per iteration through the `log` facade
//! - [`GradientTolerance`] — stops a run once the gradient is small enough
//!
//! [`Observer`]: descent_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasObjective`]: traits::HasObjective
//! [`HasGradientNorm`]: traits::HasGradientNorm
//! [`HasStep`]: traits::HasStep
//! [`HasEvaluations`]: traits::HasEvaluations
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod logging;
mod tolerance;

pub use logging::LogObserver;
pub use tolerance::GradientTolerance;
