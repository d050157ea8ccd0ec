//! Accuracy metrics for forecast evaluation.

use crate::error::{BacktestError, Result};

/// Aggregate accuracy of one model over a sequence of forecast errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

/// Reduce forecast errors (actual minus predicted) to MAE and RMSE.
///
/// Both statistics depend only on the multiset of errors, not their order.
///
/// # Errors
/// Returns [`BacktestError::EmptyInput`] when `errors` is empty rather than
/// producing NaN metrics.
///
/// # Example
/// ```
/// use nowcast_backtest::utils::summarize;
///
/// let summary = summarize(&[1.0, -1.0, 2.0, -2.0]).unwrap();
/// assert!((summary.mae - 1.5).abs() < 1e-12);
/// assert!((summary.rmse - 2.5_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn summarize(errors: &[f64]) -> Result<ErrorSummary> {
    if errors.is_empty() {
        return Err(BacktestError::EmptyInput);
    }

    let n = errors.len() as f64;
    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e * e).sum::<f64>() / n;

    Ok(ErrorSummary {
        mae,
        rmse: mse.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn summarize_known_values() {
        let summary = summarize(&[1.0, -1.0, 2.0, -2.0]).unwrap();

        assert_relative_eq!(summary.mae, 1.5, epsilon = 1e-12);
        assert_relative_eq!(summary.rmse, 1.58113883, epsilon = 1e-8);
    }

    #[test]
    fn summarize_perfect_forecast() {
        let summary = summarize(&[0.0, 0.0, 0.0]).unwrap();

        assert_eq!(summary.mae, 0.0);
        assert_eq!(summary.rmse, 0.0);
    }

    #[test]
    fn summarize_empty_is_error() {
        assert!(matches!(summarize(&[]), Err(BacktestError::EmptyInput)));
    }

    #[test]
    fn rmse_dominates_mae() {
        let summary = summarize(&[0.3, -2.0, 0.1, 0.7, -0.05]).unwrap();
        assert!(summary.rmse >= summary.mae);
    }

    #[test]
    fn summarize_is_order_independent() {
        let a = summarize(&[0.5, -1.5, 3.0, 0.25]).unwrap();
        let b = summarize(&[3.0, 0.25, -1.5, 0.5]).unwrap();

        assert_relative_eq!(a.mae, b.mae, epsilon = 1e-12);
        assert_relative_eq!(a.rmse, b.rmse, epsilon = 1e-12);
    }
}
