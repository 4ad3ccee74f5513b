//! Forecast result structure holding predictions and interval bounds.

use crate::error::{ForecastError, Result};

/// A completed forecast on the original (un-differenced) scale.
///
/// All three sequences have length equal to the requested horizon. The
/// bounds are symmetric around the point forecast at the configured
/// confidence level. Constructed once by the pipeline and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    horizon: usize,
    point: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    confidence_level: f64,
}

impl ForecastResult {
    /// Assemble a forecast result, checking that all sequences match the
    /// stated horizon.
    pub fn new(
        point: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        confidence_level: f64,
    ) -> Result<Self> {
        let horizon = point.len();
        if lower.len() != horizon || upper.len() != horizon {
            return Err(ForecastError::Validation(format!(
                "bound lengths ({}, {}) must match forecast horizon {horizon}",
                lower.len(),
                upper.len()
            )));
        }
        Ok(Self {
            horizon,
            point,
            lower,
            upper,
            confidence_level,
        })
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Point forecast per step.
    pub fn point_forecast(&self) -> &[f64] {
        &self.point
    }

    /// Lower confidence bound per step.
    pub fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    /// Upper confidence bound per step.
    pub fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    /// Confidence level the bounds were computed at.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Width of the confidence interval at each step.
    pub fn interval_widths(&self) -> Vec<f64> {
        self.upper
            .iter()
            .zip(self.lower.iter())
            .map(|(u, l)| u - l)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forecast_result_exposes_sequences() {
        let result = ForecastResult::new(
            vec![2.0, 3.0, 4.0],
            vec![1.0, 1.5, 2.0],
            vec![3.0, 4.5, 6.0],
            0.95,
        )
        .unwrap();

        assert_eq!(result.horizon(), 3);
        assert_eq!(result.point_forecast(), &[2.0, 3.0, 4.0]);
        assert_eq!(result.lower_bound(), &[1.0, 1.5, 2.0]);
        assert_eq!(result.upper_bound(), &[3.0, 4.5, 6.0]);
        assert_relative_eq!(result.confidence_level(), 0.95);

        let widths = result.interval_widths();
        assert_relative_eq!(widths[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(widths[2], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn forecast_result_rejects_mismatched_bounds() {
        let result = ForecastResult::new(vec![1.0, 2.0], vec![0.5], vec![1.5, 2.5], 0.95);
        assert!(matches!(result, Err(ForecastError::Validation(_))));
    }
}
