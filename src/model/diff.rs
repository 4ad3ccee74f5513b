//! Integer-order differencing and its exact inverse.

use crate::error::{ForecastError, Result};

/// Apply first-order differencing `d` times.
///
/// Each pass replaces the series with consecutive differences, dropping one
/// element, so the result has length `series.len() - d`. Fails with
/// [`ForecastError::InsufficientData`] when `d >= series.len()`.
pub fn difference(series: &[f64], d: usize) -> Result<Vec<f64>> {
    if d >= series.len() {
        return Err(ForecastError::InsufficientData {
            needed: d + 1,
            got: series.len(),
        });
    }

    let mut result = series.to_vec();
    for _ in 0..d {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(result)
}

/// Collect the integration anchors for a series: the last element of
/// `difference(series, k)` for each level `k = 0..d`.
///
/// These are exactly the values [`integrate`] needs to extend the series on
/// the original scale.
pub fn tail_anchors(series: &[f64], d: usize) -> Result<Vec<f64>> {
    if d > series.len() {
        return Err(ForecastError::InsufficientData {
            needed: d,
            got: series.len(),
        });
    }

    let mut anchors = Vec::with_capacity(d);
    let mut level = series.to_vec();
    for _ in 0..d {
        // d <= len guarantees each level is non-empty here
        anchors.push(*level.last().unwrap());
        level = level.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(anchors)
}

/// Invert `d` levels of differencing by cumulative summation, anchored
/// level-by-level on `anchors` (as produced by [`tail_anchors`]).
///
/// `anchors[k]` is the value that immediately precedes the differenced
/// segment at level `k`. Integration is exact: integrating the differenced
/// continuation of a series reproduces the original-scale values with no
/// approximation.
pub fn integrate(differenced: &[f64], anchors: &[f64], d: usize) -> Result<Vec<f64>> {
    if anchors.len() != d {
        return Err(ForecastError::Validation(format!(
            "expected {d} integration anchors, got {}",
            anchors.len()
        )));
    }

    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let mut cumsum = anchors[level];
        for value in &mut result {
            cumsum += *value;
            *value = cumsum;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_order_0_is_identity() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(difference(&series, 0).unwrap(), series);
    }

    #[test]
    fn difference_order_1() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&series, 1).unwrap(), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn difference_order_2() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        // First diff: [2, 3, 4, 5], second diff: [1, 1, 1]
        assert_eq!(difference(&series, 2).unwrap(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn difference_constant_series_is_zero() {
        let series = vec![5.0, 5.0, 5.0, 5.0];
        assert_eq!(difference(&series, 1).unwrap(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn difference_rejects_excessive_order() {
        let series = vec![1.0, 2.0, 3.0];
        assert_eq!(
            difference(&series, 3),
            Err(ForecastError::InsufficientData { needed: 4, got: 3 })
        );
        assert!(difference(&series, 2).is_ok());
    }

    #[test]
    fn tail_anchors_one_per_level() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        // Level 0 tail: 15, level 1 tail: last of [2,3,4,5] = 5
        assert_eq!(tail_anchors(&series, 2).unwrap(), vec![15.0, 5.0]);
        assert!(tail_anchors(&series, 0).unwrap().is_empty());
    }

    #[test]
    fn integrate_continues_the_series() {
        let original = vec![10.0, 12.0, 15.0, 19.0, 24.0];
        let anchors = tail_anchors(&original, 1).unwrap();
        let forecast_diff = vec![6.0, 7.0];

        let integrated = integrate(&forecast_diff, &anchors, 1).unwrap();
        // 24 + 6 = 30, 30 + 7 = 37
        assert_relative_eq!(integrated[0], 30.0, epsilon = 1e-12);
        assert_relative_eq!(integrated[1], 37.0, epsilon = 1e-12);
    }

    #[test]
    fn integrate_inverts_second_differences() {
        // Quadratic: second differences are constant 2
        let original = vec![1.0, 4.0, 9.0, 16.0, 25.0];
        let anchors = tail_anchors(&original, 2).unwrap();

        let integrated = integrate(&[2.0, 2.0, 2.0], &anchors, 2).unwrap();
        assert_relative_eq!(integrated[0], 36.0, epsilon = 1e-12);
        assert_relative_eq!(integrated[1], 49.0, epsilon = 1e-12);
        assert_relative_eq!(integrated[2], 64.0, epsilon = 1e-12);
    }

    #[test]
    fn integrate_rejects_wrong_anchor_count() {
        let result = integrate(&[1.0, 2.0], &[5.0], 2);
        assert!(matches!(result, Err(ForecastError::Validation(_))));
    }

    #[test]
    fn round_trip_reconstructs_the_series_tail() {
        // Differencing then integrating, anchored on the first d points,
        // must reproduce the remainder of the series exactly.
        let series = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        for d in 0..=3 {
            let diffs = difference(&series, d).unwrap();
            let anchors = tail_anchors(&series[..d], d).unwrap();
            let rebuilt = integrate(&diffs, &anchors, d).unwrap();
            assert_eq!(rebuilt.len(), series.len() - d);
            for (got, want) in rebuilt.iter().zip(series[d..].iter()) {
                assert_relative_eq!(got, want, epsilon = 1e-9);
            }
        }
    }
}
