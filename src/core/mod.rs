//! Core data structures: the observed series and the forecast result.

pub mod forecast;
pub mod time_series;

pub use forecast::ForecastResult;
pub use time_series::TimeSeries;
