//! End-to-end forecast pipeline: validate, difference, estimate, forecast,
//! integrate, package.
//!
//! The pipeline is the single entry point collaborators call. Each
//! invocation is a pure synchronous computation over its own working state;
//! concurrent invocations share nothing.

use crate::core::{ForecastResult, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::model::{
    difference, estimate, forecast_differenced, forecast_variances, integrate, tail_anchors,
    EstimatorConfig, ModelOrder,
};
use crate::utils::stats::quantile_normal;

/// Configured forecast pipeline.
///
/// Holds the confidence level for interval bounds (default 95%) and the
/// estimator tolerances. Construction is infallible; all input validation
/// happens per call in [`forecast`](Self::forecast).
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    confidence_level: f64,
    estimator: EstimatorConfig,
}

impl ForecastPipeline {
    /// Create a pipeline with a 95% confidence level and default estimator
    /// tolerances.
    pub fn new() -> Self {
        Self {
            confidence_level: 0.95,
            estimator: EstimatorConfig::default(),
        }
    }

    /// Set the confidence level for the interval bounds.
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Set the estimator tolerances.
    pub fn with_estimator_config(mut self, config: EstimatorConfig) -> Self {
        self.estimator = config;
        self
    }

    /// Fit an ARIMA model of the given order to the series and project it
    /// `horizon` steps forward with confidence bounds.
    ///
    /// Sub-component failures propagate unchanged; the pipeline itself only
    /// rejects a degenerate order, a non-positive horizon, an out-of-range
    /// confidence level, and a series shorter than `d + p + q + 2`.
    pub fn forecast(
        &self,
        series: &TimeSeries,
        order: ModelOrder,
        horizon: usize,
    ) -> Result<ForecastResult> {
        order.validate()?;

        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon(horizon));
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::Validation(format!(
                "confidence level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }

        let min_len = order.min_series_len();
        if series.len() < min_len {
            return Err(ForecastError::InsufficientData {
                needed: min_len,
                got: series.len(),
            });
        }

        let values = series.values();
        let working = difference(values, order.d)?;
        let model = estimate(&working, order, &self.estimator)?;

        let diff_forecast = forecast_differenced(&model, &working, horizon);
        let anchors = tail_anchors(values, order.d)?;
        let point = integrate(&diff_forecast, &anchors, order.d)?;

        let variances = forecast_variances(&model, horizon);
        let z = quantile_normal((1.0 + self.confidence_level) / 2.0);

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (value, variance) in point.iter().zip(variances.iter()) {
            let half_width = z * variance.sqrt();
            lower.push(value - half_width);
            upper.push(value + half_width);
        }

        ForecastResult::new(point, lower, upper, self.confidence_level)
    }
}

impl Default for ForecastPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Forecast with the default pipeline (95% confidence level, default
/// estimator tolerances).
pub fn forecast(series: &TimeSeries, order: ModelOrder, horizon: usize) -> Result<ForecastResult> {
    ForecastPipeline::new().forecast(series, order, horizon)
}
