//! Simulation-aligned duration estimators for route construction.
//!
//! Converts physical travel and service time into durations the discrete
//! simulation clock can represent. Both estimators are pure functions of
//! their configuration and inputs and hold no mutable state.

use thiserror::Error;

use crate::traits::{Link, StopDurationProvider, TravelDurationProvider};

/// Default simulation time step in seconds.
const DEFAULT_TIME_STEP: f64 = 1.0;

/// Default dwell time at a stop in seconds.
const DEFAULT_STOP_DURATION: f64 = 60.0;

#[derive(Debug, Error)]
pub enum EstimateError {
    /// A configuration or input value outside its valid domain.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Configuration values for the duration estimators.
///
/// Plain data; validation happens in the estimator constructors.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Simulation time step in seconds.
    pub time_step: f64,
    /// Safety margin scaling quantized travel times upward.
    pub overestimation_factor: f64,
    /// Fixed service duration at a stop in seconds.
    pub stop_duration: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            overestimation_factor: 0.0,
            stop_duration: DEFAULT_STOP_DURATION,
        }
    }
}

/// Estimates link traversal durations aligned to the simulation clock.
///
/// The free-flow time is quantized up to the next multiple of the time step
/// and one further step is added, so the estimate always exceeds the
/// physical travel time by between one and two steps. A vehicle is therefore
/// never scheduled to arrive earlier than the discretized clock allows. The
/// overestimation factor scales the quantized duration further to build in
/// slack.
#[derive(Debug, Clone)]
pub struct LinkTravelTimeEstimator {
    time_step: f64,
    overestimation_factor: f64,
}

impl LinkTravelTimeEstimator {
    pub fn new(time_step: f64, overestimation_factor: f64) -> Result<Self, EstimateError> {
        if !(time_step > 0.0) {
            return Err(EstimateError::InvalidParameter {
                name: "time_step",
                value: time_step,
            });
        }
        if !(overestimation_factor >= 0.0) {
            return Err(EstimateError::InvalidParameter {
                name: "overestimation_factor",
                value: overestimation_factor,
            });
        }

        Ok(Self {
            time_step,
            overestimation_factor,
        })
    }

    pub fn from_config(config: &EstimatorConfig) -> Result<Self, EstimateError> {
        Self::new(config.time_step, config.overestimation_factor)
    }

    /// Estimated duration to traverse `link`, in seconds.
    ///
    /// Fails if the link reports a non-positive free speed. A zero-length
    /// link still yields one full time step.
    pub fn estimate<L: Link>(&self, link: &L) -> Result<f64, EstimateError> {
        let free_speed = link.free_speed();
        if !(free_speed > 0.0) {
            return Err(EstimateError::InvalidParameter {
                name: "free_speed",
                value: free_speed,
            });
        }

        let free_flow = link.length() / free_speed;
        let quantized = self.time_step * (free_flow / self.time_step).floor() + self.time_step;

        Ok(quantized * (1.0 + self.overestimation_factor))
    }
}

impl TravelDurationProvider for LinkTravelTimeEstimator {
    fn travel_duration<L: Link>(&self, link: &L) -> Result<f64, EstimateError> {
        self.estimate(link)
    }
}

/// Returns a fixed service duration for every pickup and drop-off.
///
/// Models a vehicle- and load-independent dwell time, feeding a constant
/// into the routing cost function without conditioning on capacity or
/// position in route.
#[derive(Debug, Clone)]
pub struct StopDurationEstimator {
    fixed_duration: f64,
}

impl StopDurationEstimator {
    pub fn new(fixed_duration: f64) -> Result<Self, EstimateError> {
        if !(fixed_duration >= 0.0) {
            return Err(EstimateError::InvalidParameter {
                name: "fixed_duration",
                value: fixed_duration,
            });
        }

        Ok(Self { fixed_duration })
    }

    pub fn from_config(config: &EstimatorConfig) -> Result<Self, EstimateError> {
        Self::new(config.stop_duration)
    }

    pub fn fixed_duration(&self) -> f64 {
        self.fixed_duration
    }
}

impl<V, S, R> StopDurationProvider<V, S, R> for StopDurationEstimator {
    fn pickup_duration(&self, _vehicle: &V, _stop: &S, _request: &R) -> f64 {
        self.fixed_duration
    }

    fn dropoff_duration(&self, _vehicle: &V, _stop: &S, _request: &R) -> f64 {
        self.fixed_duration
    }
}
