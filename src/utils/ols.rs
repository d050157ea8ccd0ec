//! Ordinary Least Squares (OLS) regression with an intercept.
//!
//! The fit solves the least-squares problem through a Householder QR
//! factorization of the design matrix, so the normal-equation matrix X'X is
//! never formed or inverted. A design whose columns are (numerically)
//! linearly dependent is reported as a [`BacktestError::Numerical`] error.

use crate::error::{BacktestError, Result};

/// Relative threshold below which a diagonal of R counts as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// OLS regression coefficients and intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct OLSResult {
    /// Regression coefficients (one per predictor column, in input order).
    pub coefficients: Vec<f64>,
    /// Intercept term.
    pub intercept: f64,
}

impl OLSResult {
    /// Predict a single observation from its predictor values.
    pub fn predict_one(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.coefficients.len() {
            return Err(BacktestError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: x.len(),
            });
        }

        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(b, xi)| b * xi)
                .sum::<f64>())
    }
}

/// Fit OLS regression: y = intercept + sum_j coefficients[j] * columns[j]
///
/// # Arguments
/// * `y` - Target values (length n)
/// * `columns` - Predictor columns (each length n)
///
/// # Errors
/// * `DimensionMismatch` when a column's length differs from `y`
/// * `Numerical` when there are fewer observations than parameters, the
///   input is non-finite or the design matrix is rank deficient
pub fn ols_fit(y: &[f64], columns: &[Vec<f64>]) -> Result<OLSResult> {
    let n = y.len();
    let num_params = columns.len() + 1;

    if n < num_params {
        return Err(BacktestError::Numerical(format!(
            "OLS design is underdetermined: {} parameters from {} rows",
            num_params, n
        )));
    }

    for col in columns {
        if col.len() != n {
            return Err(BacktestError::DimensionMismatch {
                expected: n,
                got: col.len(),
            });
        }
    }

    if y.iter().chain(columns.iter().flatten()).any(|v| !v.is_finite()) {
        return Err(BacktestError::Numerical(
            "OLS input contains non-finite values".into(),
        ));
    }

    // Design matrix, row-major: [1, x1, x2, ...]
    let mut a: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row = Vec::with_capacity(num_params);
            row.push(1.0);
            row.extend(columns.iter().map(|c| c[i]));
            row
        })
        .collect();
    let mut b = y.to_vec();

    let column_norms: Vec<f64> = (0..num_params)
        .map(|j| a.iter().map(|row| row[j] * row[j]).sum::<f64>().sqrt())
        .collect();

    householder_qr(&mut a, &mut b, &column_norms)?;
    let beta = back_substitute(&a, &b, num_params);

    Ok(OLSResult {
        intercept: beta[0],
        coefficients: beta[1..].to_vec(),
    })
}

/// In-place Householder reduction of `a` to upper-triangular R, applying the
/// same reflections to `b` (leaving Q'b).
fn householder_qr(a: &mut [Vec<f64>], b: &mut [f64], column_norms: &[f64]) -> Result<()> {
    let n = a.len();
    let p = column_norms.len();

    for j in 0..p {
        let norm = (j..n).map(|i| a[i][j] * a[i][j]).sum::<f64>().sqrt();
        if norm <= RANK_TOLERANCE * column_norms[j] {
            return Err(BacktestError::Numerical(format!(
                "OLS design matrix is rank deficient (column {} is degenerate)",
                j
            )));
        }

        let alpha = if a[j][j] > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = (j..n).map(|i| a[i][j]).collect();
        v[0] -= alpha;
        let v_norm_sq: f64 = v.iter().map(|x| x * x).sum();

        for c in j..p {
            let s: f64 = v.iter().zip(j..n).map(|(vi, i)| vi * a[i][c]).sum();
            let factor = 2.0 * s / v_norm_sq;
            for (vi, i) in v.iter().zip(j..n) {
                a[i][c] -= factor * vi;
            }
        }

        let s: f64 = v.iter().zip(j..n).map(|(vi, i)| vi * b[i]).sum();
        let factor = 2.0 * s / v_norm_sq;
        for (vi, i) in v.iter().zip(j..n) {
            b[i] -= factor * vi;
        }
    }

    Ok(())
}

/// Solve R x = b for the leading p×p upper-triangular block.
fn back_substitute(r: &[Vec<f64>], b: &[f64], p: usize) -> Vec<f64> {
    let mut x = vec![0.0; p];
    for i in (0..p).rev() {
        let mut sum = b[i];
        for j in (i + 1)..p {
            sum -= r[i][j] * x[j];
        }
        x[i] = sum / r[i][i];
    }
    x
}
