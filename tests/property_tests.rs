//! Property-based tests for the differencing transform, the closed-form
//! estimation path, and pipeline-level invariants.

use arima_forecast::model::{difference, estimate, integrate, tail_anchors};
use arima_forecast::model::{EstimatorConfig, ModelOrder};
use arima_forecast::prelude::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn make_series(values: &[f64]) -> TimeSeries {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps: Vec<DateTime<Utc>> = (0..values.len())
        .map(|i| base + Duration::hours(i as i64))
        .collect();
    TimeSeries::new(timestamps, values.to_vec()).unwrap()
}

/// Random values with a small index-dependent jitter so that series are
/// never exactly constant or exactly collinear.
fn varied_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..1000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.001 + ((i * i) as f64 * 0.3).sin() * 0.01;
            }
            v
        })
    })
}

/// Values with a clear linear trend plus bounded noise.
fn trending_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        (10.0..100.0_f64, 0.5..3.0_f64).prop_map(move |(base, slope)| {
            (0..len)
                .map(|i| base + slope * i as f64 + (i as f64 * 0.83).sin())
                .collect()
        })
    })
}

proptest! {
    /// Differencing then integrating, anchored on the first d observations,
    /// reproduces the rest of the series exactly.
    #[test]
    fn round_trip_law(values in varied_values_strategy(8, 60), d in 0usize..4) {
        let diffs = difference(&values, d).unwrap();
        let anchors = tail_anchors(&values[..d], d).unwrap();
        let rebuilt = integrate(&diffs, &anchors, d).unwrap();

        prop_assert_eq!(rebuilt.len(), values.len() - d);
        for (got, want) in rebuilt.iter().zip(values[d..].iter()) {
            prop_assert!((got - want).abs() < 1e-6 * want.abs().max(1.0));
        }
    }

    /// Integration continues a series from any split point: the differenced
    /// tail anchored on the observed prefix rebuilds the held-out suffix.
    #[test]
    fn integration_continues_from_any_split(
        values in varied_values_strategy(12, 60),
        d in 0usize..3,
        split_offset in 0usize..8,
    ) {
        let m = (d + 2 + split_offset).min(values.len() - 1);
        let diffs = difference(&values, d).unwrap();
        let anchors = tail_anchors(&values[..m], d).unwrap();
        let rebuilt = integrate(&diffs[m - d..], &anchors, d).unwrap();

        prop_assert_eq!(rebuilt.len(), values.len() - m);
        for (got, want) in rebuilt.iter().zip(values[m..].iter()) {
            prop_assert!((got - want).abs() < 1e-6 * want.abs().max(1.0));
        }
    }

    /// With q = 0 and p = 1 the estimator must match the textbook
    /// ordinary-least-squares solution on the lagged pairs.
    #[test]
    fn q0_estimation_equals_closed_form_ols(values in varied_values_strategy(10, 50)) {
        let model = estimate(
            &values,
            ModelOrder::new(1, 0, 0),
            &EstimatorConfig::default(),
        )
        .unwrap();

        // Closed-form simple regression of y_t on y_{t-1}
        let x = &values[..values.len() - 1];
        let y = &values[1..];
        let n = x.len() as f64;
        let sx: f64 = x.iter().sum();
        let sy: f64 = y.iter().sum();
        let sxx: f64 = x.iter().map(|v| v * v).sum();
        let sxy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();

        let phi = (n * sxy - sx * sy) / (n * sxx - sx * sx);
        let intercept = (sy - phi * sx) / n;

        prop_assert!((model.ar_coefficients()[0] - phi).abs() < 1e-6 * phi.abs().max(1.0));
        prop_assert!((model.intercept() - intercept).abs() < 1e-6 * intercept.abs().max(1.0));
    }

    /// A series of exactly d + p + q + 1 points is always rejected as
    /// insufficient, whatever the values.
    #[test]
    fn minimum_data_rejection(
        values in varied_values_strategy(30, 40),
        p in 0usize..3,
        d in 0usize..3,
        q in 0usize..3,
    ) {
        prop_assume!(p + q >= 1);
        let order = ModelOrder::new(p, d, q);
        let len = d + p + q + 1;
        let series = make_series(&values[..len]);

        let result = forecast(&series, order, 3);
        prop_assert_eq!(
            result,
            Err(ForecastError::InsufficientData { needed: len + 1, got: len })
        );
    }

    /// Interval widths never shrink across the horizon, and bounds always
    /// bracket the point forecast.
    #[test]
    fn intervals_widen_monotonically(values in trending_values_strategy(20, 60)) {
        let series = make_series(&values);
        let result = forecast(&series, ModelOrder::new(1, 1, 0), 10).unwrap();

        let widths = result.interval_widths();
        for pair in widths.windows(2) {
            prop_assert!(pair[1] >= pair[0] - 1e-9);
        }
        for k in 0..result.horizon() {
            prop_assert!(result.lower_bound()[k] <= result.point_forecast()[k]);
            prop_assert!(result.point_forecast()[k] <= result.upper_bound()[k]);
        }
    }
}
