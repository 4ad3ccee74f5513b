//! Numeric utilities shared by the estimator and forecaster.

pub mod linalg;
pub mod stats;

pub use linalg::solve_symmetric;
pub use stats::{mean, quantile_normal, variance};
