//! TimeSeries data structure for representing a univariate observed series.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// An immutable univariate time series.
///
/// Construction validates the invariants every downstream component relies
/// on: at least two observations, strictly increasing timestamps, and
/// finite values. A successfully constructed series is never mutated; the
/// pipeline only borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new validated time series from aligned timestamp/value pairs.
    ///
    /// Fails with [`ForecastError::Validation`] on mismatched lengths,
    /// non-monotonic or duplicate timestamps, or non-finite values, and with
    /// [`ForecastError::InsufficientData`] when fewer than two observations
    /// are provided.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::Validation(format!(
                "timestamps and values must be aligned: {} timestamps, {} values",
                timestamps.len(),
                values.len()
            )));
        }

        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        for window in timestamps.windows(2) {
            if window[1] <= window[0] {
                return Err(ForecastError::Validation(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::Validation(format!(
                "non-finite value at index {pos}"
            )));
        }

        Ok(Self { timestamps, values })
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty. Always false for a constructed series,
    /// kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the observation timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get the observed values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the last observed timestamp.
    pub fn last_timestamp(&self) -> DateTime<Utc> {
        // len >= 2 is guaranteed by construction
        *self.timestamps.last().unwrap()
    }

    /// Get the last observed value.
    pub fn last_value(&self) -> f64 {
        *self.values.last().unwrap()
    }
}
