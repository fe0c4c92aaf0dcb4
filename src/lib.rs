//! vrp-diagnostics core
//!
//! Duration estimators and iteration diagnostics for iterative
//! vehicle-routing solvers.

pub mod traits;
pub mod estimator;
pub mod progress;
pub mod unassigned;
pub mod monitor;
