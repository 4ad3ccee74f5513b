//! Recursive multi-step forecasting from a fitted model.
//!
//! Point forecasts are produced on the differenced scale by recursive
//! substitution: lags that fall inside the observed window use actual
//! working values, later lags use the forecasts already produced, and
//! future innovations enter as zero. Forecast-error variance compounds
//! across the horizon through the impulse-response (psi) weights of the
//! full integrated process.

use crate::model::estimate::FittedModel;

/// Forecast `horizon` steps ahead on the differenced (working) scale.
pub fn forecast_differenced(model: &FittedModel, working: &[f64], horizon: usize) -> Vec<f64> {
    let p = model.order().p;
    let q = model.order().q;
    let ar = model.ar_coefficients();
    let ma = model.ma_coefficients();

    let mut extended = working.to_vec();
    let mut innovations = model.residuals().to_vec();

    for _ in 0..horizon {
        let t = extended.len();
        let mut pred = model.intercept();

        for i in 0..p {
            if t > i {
                pred += ar[i] * extended[t - 1 - i];
            }
        }
        // Future innovations are zero; only observed residuals contribute
        for j in 0..q {
            if t > j {
                pred += ma[j] * innovations[t - 1 - j];
            }
        }

        extended.push(pred);
        innovations.push(0.0);
    }

    extended[working.len()..].to_vec()
}

/// Impulse-response weights ψ₀..ψ_{h−1} of the integrated ARMA process.
///
/// The AR polynomial is multiplied by `(1 − B)^d` first, so the weights
/// describe shock propagation on the original scale and the resulting
/// variances are valid after integration.
pub fn psi_weights(ar: &[f64], ma: &[f64], d: usize, horizon: usize) -> Vec<f64> {
    // Coefficients of φ(B)·(1−B)^d, stored as the polynomial 1 − Σ A_i B^i
    let mut poly = Vec::with_capacity(ar.len() + d + 1);
    poly.push(1.0);
    poly.extend(ar.iter().map(|phi| -phi));
    for _ in 0..d {
        let mut next = vec![0.0; poly.len() + 1];
        for (i, c) in poly.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c;
        }
        poly = next;
    }
    let a: Vec<f64> = poly[1..].iter().map(|c| -c).collect();

    let mut psi = Vec::with_capacity(horizon);
    for k in 0..horizon {
        if k == 0 {
            psi.push(1.0);
            continue;
        }
        let mut w = if k <= ma.len() { ma[k - 1] } else { 0.0 };
        for i in 1..=a.len().min(k) {
            w += a[i - 1] * psi[k - i];
        }
        psi.push(w);
    }
    psi
}

/// Forecast-error variance at each step of the horizon:
/// `var_k = σ² · Σ_{j<k} ψ_j²`, non-decreasing in k by construction.
pub fn forecast_variances(model: &FittedModel, horizon: usize) -> Vec<f64> {
    let order = model.order();
    let psi = psi_weights(
        model.ar_coefficients(),
        model.ma_coefficients(),
        order.d,
        horizon,
    );
    let sigma2 = model.residual_variance();

    let mut variances = Vec::with_capacity(horizon);
    let mut acc = 0.0;
    for w in psi {
        acc += w * w;
        variances.push(sigma2 * acc);
    }
    variances
}
