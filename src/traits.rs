//! Core domain traits for the diagnostics layer.
//!
//! These are intentionally minimal and domain-agnostic. Concrete search
//! engines and scenario models should implement them for their own data
//! models.

use std::hash::Hash;

use crate::estimator::EstimateError;

/// Unique identifier for jobs and other search entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A network link traversed at a constant free-flow speed.
pub trait Link {
    /// Link length in meters.
    fn length(&self) -> f64;

    /// Free-flow speed in meters per second.
    fn free_speed(&self) -> f64;
}

/// A complete candidate solution produced by one search iteration.
pub trait CandidateSolution {
    /// Total solution cost under the search objective.
    fn cost(&self) -> f64;

    /// Number of vehicles with non-empty routes.
    fn route_count(&self) -> usize;
}

/// Provides link traversal durations during route construction.
///
/// Implementations must be safe to call concurrently from evaluation
/// worker threads.
pub trait TravelDurationProvider {
    /// Estimated duration to traverse `link`, in seconds.
    fn travel_duration<L: Link>(&self, link: &L) -> Result<f64, EstimateError>;
}

/// Provides stop service durations during route construction.
///
/// The vehicle, stop, and request are passed through so implementations
/// may condition on them; they are free to ignore all three.
pub trait StopDurationProvider<V, S, R> {
    /// Service duration for picking a request up at a stop, in seconds.
    fn pickup_duration(&self, vehicle: &V, stop: &S, request: &R) -> f64;

    /// Service duration for dropping a request off at a stop, in seconds.
    fn dropoff_duration(&self, vehicle: &V, stop: &S, request: &R) -> f64;
}
