//! Small dense linear algebra used by the estimator.

/// Solve a symmetric positive definite system `A x = b` via Cholesky
/// decomposition.
///
/// Returns `None` when the matrix is not positive definite (within a small
/// pivot tolerance), which the estimator treats as a singular model. No
/// ridge term is added: near-singularity must surface, not be papered over.
pub fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n || a.iter().any(|row| row.len() != n) {
        return None;
    }

    // Pivot tolerance scaled by the largest diagonal entry
    let max_diag = (0..n).map(|i| a[i][i].abs()).fold(0.0, f64::max);
    let tol = 1e-12 * max_diag.max(1.0);

    // Cholesky decomposition A = L L'
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= tol {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
