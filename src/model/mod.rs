//! ARIMA model components: order, differencing, estimation, forecasting.

pub mod diff;
pub mod estimate;
pub mod order;
pub mod predict;

pub use diff::{difference, integrate, tail_anchors};
pub use estimate::{estimate, EstimatorConfig, FittedModel};
pub use order::ModelOrder;
pub use predict::{forecast_differenced, forecast_variances, psi_weights};
