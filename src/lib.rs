//! # arima-forecast
//!
//! Univariate ARIMA(p, d, q) forecasting engine.
//!
//! Given a validated historical series, the crate fits a linear model
//! capturing trend and short-memory autocorrelation by conditional least
//! squares, then projects it forward with quantified uncertainty. The model
//! order is supplied by the caller; there is no automatic order search, no
//! seasonal component, and no exogenous regressors.
//!
//! The single entry point is [`pipeline::forecast`]:
//!
//! ```
//! use arima_forecast::prelude::*;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let timestamps = (0..5).map(|i| base + Duration::days(i)).collect();
//! let series = TimeSeries::new(timestamps, vec![100.0, 104.0, 108.0, 112.0, 116.0]).unwrap();
//!
//! let result = forecast(&series, ModelOrder::new(1, 1, 0), 3).unwrap();
//! assert_eq!(result.horizon(), 3);
//! assert!((result.point_forecast()[0] - 120.0).abs() < 1e-6);
//! ```

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{ForecastResult, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::model::{EstimatorConfig, FittedModel, ModelOrder};
    pub use crate::pipeline::{forecast, ForecastPipeline};
}
