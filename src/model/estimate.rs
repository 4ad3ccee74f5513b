//! Conditional least squares estimation of ARMA parameters.
//!
//! The estimator works on the already-differenced (working) series and
//! minimizes the sum of squared one-step-ahead residuals
//! `e_t = y_t - c - Σ φ_i y_{t-i} - Σ θ_j e_{t-j}` with the first
//! `max(p, q)` residuals pinned at zero (burn-in). With `q = 0` the
//! objective is linear and solved in closed form; with `q >= 1` the
//! residual feedback makes it nonlinear and a Gauss-Newton iteration with
//! an analytically recursed Jacobian is used.

use crate::error::{ForecastError, Result};
use crate::model::order::ModelOrder;
use crate::utils::linalg::solve_symmetric;
use crate::utils::stats::mean;

/// Tolerances for the iterative (q >= 1) estimation path.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Maximum number of Gauss-Newton iterations.
    pub max_iter: usize,
    /// Relative tolerance on the change in residual sum of squares.
    pub tolerance: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_iter: 50,
            tolerance: 1e-6,
        }
    }
}

/// A fitted ARMA model on the differenced scale.
///
/// Exclusively owned by the pipeline invocation that produced it; nothing
/// is shared across fits.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    order: ModelOrder,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    residual_variance: f64,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl FittedModel {
    /// The order this model was fitted with.
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// AR coefficients φ₁..φₚ.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// MA coefficients θ₁..θ_q.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Intercept (drift on the differenced scale).
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// One-step fitted values on the working scale, NaN during burn-in.
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    /// One-step residuals aligned to the working series, zero during burn-in.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Innovation variance estimate.
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// Akaike information criterion, `None` for a perfect (zero-variance) fit.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Bayesian information criterion, `None` for a perfect fit.
    pub fn bic(&self) -> Option<f64> {
        self.bic
    }
}

/// Fit ARMA(p, q) coefficients to a working series by conditional least
/// squares.
///
/// Fails with [`ForecastError::InsufficientData`] when the series does not
/// exceed `p + q` points, [`ForecastError::SingularModel`] on degenerate
/// numerics, and [`ForecastError::NonConvergence`] when the iterative path
/// exhausts its cap.
pub fn estimate(working: &[f64], order: ModelOrder, config: &EstimatorConfig) -> Result<FittedModel> {
    order.validate()?;
    let p = order.p;
    let q = order.q;
    let n = working.len();

    if n <= p + q {
        return Err(ForecastError::InsufficientData {
            needed: p + q + 1,
            got: n,
        });
    }

    if let Some(value) = constant_value(working) {
        return fit_constant(working, order, value);
    }

    let (intercept, ar, ma) = if q == 0 {
        let beta = lagged_ols(working, p)?;
        (beta[0], beta[1..].to_vec(), vec![])
    } else {
        gauss_newton(working, p, q, config)?
    };

    Ok(package_fit(working, order, intercept, ar, ma))
}

/// Detect a (numerically) constant series, returning its value.
fn constant_value(series: &[f64]) -> Option<f64> {
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let scale = max.abs().max(min.abs());
    if max - min <= 1e-12 * scale.max(1.0) {
        Some(series[0])
    } else {
        None
    }
}

/// Exact solution for a constant working series.
///
/// A constant series at zero carries no information: every parameter choice
/// yields identical residuals and the normal equations are singular. A
/// constant series at a non-zero value admits the exact zero-residual
/// random-walk solution (φ₁ = 1) or, with no AR term, a pure intercept.
fn fit_constant(working: &[f64], order: ModelOrder, value: f64) -> Result<FittedModel> {
    if value.abs() <= 1e-12 {
        return Err(ForecastError::SingularModel(
            "working series is constant at zero".to_string(),
        ));
    }

    let (intercept, ar) = if order.p >= 1 {
        let mut ar = vec![0.0; order.p];
        ar[0] = 1.0;
        (0.0, ar)
    } else {
        (value, vec![])
    };
    let ma = vec![0.0; order.q];

    Ok(package_fit(working, order, intercept, ar, ma))
}

/// Closed-form OLS on the lagged design matrix for the q = 0 case.
///
/// Solves `y_t = c + Σ φ_i y_{t-i}` over `t = p..n` via the normal
/// equations; returns `[c, φ₁, .., φₚ]`.
fn lagged_ols(y: &[f64], p: usize) -> Result<Vec<f64>> {
    let n = y.len();
    let m = p + 1;

    let mut xtx = vec![vec![0.0; m]; m];
    let mut xty = vec![0.0; m];

    for t in p..n {
        // row = [1, y[t-1], .., y[t-p]]
        let mut row = Vec::with_capacity(m);
        row.push(1.0);
        for i in 0..p {
            row.push(y[t - 1 - i]);
        }

        for i in 0..m {
            for j in 0..m {
                xtx[i][j] += row[i] * row[j];
            }
            xty[i] += row[i] * y[t];
        }
    }

    solve_symmetric(&xtx, &xty).ok_or_else(|| {
        ForecastError::SingularModel("lagged normal equations are singular".to_string())
    })
}

/// Gauss-Newton minimization of the conditional sum of squares for q >= 1.
///
/// Parameters are packed as `[c, φ₁.., θ₁..]`, starting from zero
/// coefficients with the intercept seeded at the series mean. Each step
/// solves the Gauss-Newton normal equations and backtracks by halving
/// until the objective does not increase.
fn gauss_newton(
    y: &[f64],
    p: usize,
    q: usize,
    config: &EstimatorConfig,
) -> Result<(f64, Vec<f64>, Vec<f64>)> {
    let m = 1 + p + q;
    let mut params = vec![0.0; m];
    params[0] = mean(y);

    let mut sse = css(y, p, q, &params);
    let mut converged = sse <= f64::EPSILON;

    for _ in 0..config.max_iter {
        if converged {
            break;
        }

        let (residuals, jacobian) = residuals_and_jacobian(y, p, q, &params);
        let start = p.max(q);
        let n = y.len();

        // Gauss-Newton normal equations over the post-burn-in rows
        let mut jtj = vec![vec![0.0; m]; m];
        let mut jte = vec![0.0; m];
        for t in start..n {
            for i in 0..m {
                let ji = jacobian[i][t];
                for j in 0..m {
                    jtj[i][j] += ji * jacobian[j][t];
                }
                jte[i] += ji * residuals[t];
            }
        }

        let direction = solve_symmetric(&jtj, &jte).ok_or_else(|| {
            ForecastError::SingularModel("Gauss-Newton normal equations are singular".to_string())
        })?;

        // Backtracking line search on the full step
        let mut step = 1.0;
        let mut improved = false;
        let mut candidate = params.clone();
        let mut candidate_sse = sse;
        for _ in 0..30 {
            for (k, c) in candidate.iter_mut().enumerate() {
                *c = params[k] - step * direction[k];
            }
            candidate_sse = css(y, p, q, &candidate);
            if candidate_sse <= sse {
                improved = true;
                break;
            }
            step *= 0.5;
        }

        if !improved {
            // No descent direction left: a stationary point of the objective
            converged = true;
            break;
        }

        let change = sse - candidate_sse;
        params = candidate;
        let previous = sse;
        sse = candidate_sse;

        if change.abs() <= config.tolerance * previous.max(f64::EPSILON) {
            converged = true;
        }
    }

    if !converged {
        return Err(ForecastError::NonConvergence {
            max_iter: config.max_iter,
        });
    }

    let intercept = params[0];
    let ar = params[1..1 + p].to_vec();
    let ma = params[1 + p..].to_vec();
    Ok((intercept, ar, ma))
}

/// Conditional sum of squares for a parameter vector `[c, φ.., θ..]`.
fn css(y: &[f64], p: usize, q: usize, params: &[f64]) -> f64 {
    let intercept = params[0];
    let ar = &params[1..1 + p];
    let ma = &params[1 + p..];
    let (_, _, sse) = one_step_residuals(y, p, q, intercept, ar, ma);
    sse
}

/// One-step fitted values and residuals under the CSS convention: the first
/// `max(p, q)` residuals are zero and excluded from the objective.
fn one_step_residuals(
    y: &[f64],
    p: usize,
    q: usize,
    intercept: f64,
    ar: &[f64],
    ma: &[f64],
) -> (Vec<f64>, Vec<f64>, f64) {
    let n = y.len();
    let start = p.max(q);

    let mut fitted = vec![f64::NAN; n];
    let mut residuals = vec![0.0; n];
    let mut sse = 0.0;

    for t in start..n {
        let mut pred = intercept;
        for i in 0..p {
            pred += ar[i] * y[t - 1 - i];
        }
        for j in 0..q {
            pred += ma[j] * residuals[t - 1 - j];
        }

        fitted[t] = pred;
        let e = y[t] - pred;
        residuals[t] = e;
        sse += e * e;
    }

    (fitted, residuals, sse)
}

/// Residuals plus their partial derivatives with respect to every
/// parameter, recursed alongside the residuals themselves.
///
/// Returns one derivative series per parameter, each aligned to the working
/// series with zeros in the burn-in region.
fn residuals_and_jacobian(y: &[f64], p: usize, q: usize, params: &[f64]) -> (Vec<f64>, Vec<Vec<f64>>) {
    let intercept = params[0];
    let ar = &params[1..1 + p];
    let ma = &params[1 + p..];

    let n = y.len();
    let start = p.max(q);
    let m = 1 + p + q;

    let mut residuals = vec![0.0; n];
    let mut jac = vec![vec![0.0; n]; m];

    for t in start..n {
        let mut pred = intercept;
        for i in 0..p {
            pred += ar[i] * y[t - 1 - i];
        }
        for j in 0..q {
            pred += ma[j] * residuals[t - 1 - j];
        }
        residuals[t] = y[t] - pred;

        // d e_t / d c
        let mut dc = -1.0;
        for j in 0..q {
            dc -= ma[j] * jac[0][t - 1 - j];
        }
        jac[0][t] = dc;

        // d e_t / d φ_i
        for i in 0..p {
            let mut d = -y[t - 1 - i];
            for j in 0..q {
                d -= ma[j] * jac[1 + i][t - 1 - j];
            }
            jac[1 + i][t] = d;
        }

        // d e_t / d θ_k
        for k in 0..q {
            let mut d = -residuals[t - 1 - k];
            for j in 0..q {
                d -= ma[j] * jac[1 + p + k][t - 1 - j];
            }
            jac[1 + p + k][t] = d;
        }
    }

    (residuals, jac)
}

/// Compute residual diagnostics and wrap everything into a `FittedModel`.
fn package_fit(
    working: &[f64],
    order: ModelOrder,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
) -> FittedModel {
    let n = working.len();
    let start = order.p.max(order.q);
    let (fitted, residuals, sse) = one_step_residuals(working, order.p, order.q, intercept, &ar, &ma);

    let n_eff = (n - start) as f64;
    let residual_variance = sse / n_eff;

    let (aic, bic) = if residual_variance > 0.0 {
        let k = order.num_params() as f64;
        let ll = -0.5 * n_eff * (1.0 + residual_variance.ln() + (2.0 * std::f64::consts::PI).ln());
        (Some(-2.0 * ll + 2.0 * k), Some(-2.0 * ll + k * n_eff.ln()))
    } else {
        (None, None)
    };

    FittedModel {
        order,
        ar,
        ma,
        intercept,
        fitted,
        residuals,
        residual_variance,
        aic,
        bic,
    }
}
