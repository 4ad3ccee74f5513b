//! ARIMA model order specification.

use crate::error::{ForecastError, Result};

/// ARIMA(p, d, q) order triple.
///
/// `p` is the autoregressive order, `d` the differencing order, `q` the
/// moving-average order. A pure differencing model (`p + q == 0`) is
/// degenerate and rejected by [`ModelOrder::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ModelOrder {
    /// Create a new order triple. No validation happens here; call
    /// [`validate`](Self::validate) or let the pipeline do it.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Total number of estimated parameters (AR + MA + intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }

    /// Minimum series length required to fit this order: `d` observations
    /// are consumed by differencing and the working series must exceed
    /// `p + q` by at least two points.
    pub fn min_series_len(&self) -> usize {
        self.d + self.p + self.q + 2
    }

    /// Check the structural invariant `p + q >= 1`.
    pub fn validate(&self) -> Result<()> {
        if self.p + self.q == 0 {
            return Err(ForecastError::Validation(
                "model order must have p + q >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ModelOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}
