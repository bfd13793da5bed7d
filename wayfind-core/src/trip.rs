//! Convert straight-line map distances into walking estimates.
//!
//! The estimator multiplies the Euclidean map distance by a fixed scale to get
//! meters and divides by a walking speed to get minutes. Both results use
//! ties-to-even rounding, and the time never drops below one minute.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NavigationPoint;

/// Default conversion from map units to meters.
pub const DEFAULT_METERS_PER_UNIT: f64 = 0.5;

/// Default walking speed in meters per minute.
pub const DEFAULT_WALKING_SPEED: f64 = 70.0;

/// Tunable constants used by [`TripEstimator`].
///
/// # Examples
///
/// ```
/// use wayfind_core::TripConfig;
///
/// # fn main() -> Result<(), wayfind_core::TripConfigError> {
/// let config = TripConfig::new(0.25, 60.0)?;
/// assert_eq!(config.walking_speed, 60.0);
/// assert!(TripConfig::new(0.0, 60.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripConfig {
    /// Meters represented by one map unit.
    pub meters_per_unit: f64,
    /// Walking speed in meters per minute.
    pub walking_speed: f64,
}

/// Errors returned by [`TripConfig::new`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TripConfigError {
    /// The map scale was zero, negative or not finite.
    #[error("meters per map unit must be a positive finite number")]
    InvalidScale,
    /// The walking speed was zero, negative or not finite.
    #[error("walking speed must be a positive finite number")]
    InvalidSpeed,
}

impl TripConfig {
    /// Validates and constructs a [`TripConfig`].
    pub fn new(meters_per_unit: f64, walking_speed: f64) -> Result<Self, TripConfigError> {
        if !is_positive(meters_per_unit) {
            return Err(TripConfigError::InvalidScale);
        }
        if !is_positive(walking_speed) {
            return Err(TripConfigError::InvalidSpeed);
        }
        Ok(Self {
            meters_per_unit,
            walking_speed,
        })
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            meters_per_unit: DEFAULT_METERS_PER_UNIT,
            walking_speed: DEFAULT_WALKING_SPEED,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Presented distance and duration for one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripEstimate {
    /// Rounded walking distance in meters.
    pub meters: u64,
    /// Rounded walking time in minutes, at least one.
    pub minutes: u64,
}

/// Derives [`TripEstimate`] values from pairs of points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripEstimator {
    config: TripConfig,
}

impl TripEstimator {
    /// Build an estimator using `config`.
    #[must_use]
    pub const fn new(config: TripConfig) -> Self {
        Self { config }
    }

    /// Constants in use.
    #[must_use]
    pub const fn config(&self) -> TripConfig {
        self.config
    }

    /// Estimate the walk between two points.
    #[must_use]
    pub fn estimate(&self, from: &NavigationPoint, to: &NavigationPoint) -> TripEstimate {
        self.estimate_distance(from.distance_to(to))
    }

    /// Estimate a walk of `distance` map units.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfind_core::{TripEstimate, TripEstimator};
    ///
    /// let estimate = TripEstimator::default().estimate_distance(140.0);
    /// assert_eq!(estimate, TripEstimate { meters: 70, minutes: 1 });
    /// ```
    #[must_use]
    pub fn estimate_distance(&self, distance: f64) -> TripEstimate {
        let meters = to_count((distance * self.config.meters_per_unit).round_ties_even());
        let minutes = to_count((meters as f64 / self.config.walking_speed).round_ties_even()).max(1);
        TripEstimate { meters, minutes }
    }
}

/// Saturating conversion of an already rounded, non-negative value.
fn to_count(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value as u64
    }
}
