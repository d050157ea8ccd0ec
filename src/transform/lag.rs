//! Lag, difference and log transforms over NaN-padded series.
//!
//! Missing values are represented as `NaN` and propagate through every
//! transform: a lag that reaches before the start of the series, or onto a
//! missing slot, is `NaN`.

/// Shift a series forward by `periods` positions.
///
/// `result[i] = series[i - periods]`, with the first `periods` entries `NaN`.
pub fn shift(series: &[f64], periods: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![f64::NAN; n];
    if periods >= n {
        return result;
    }
    result[periods..].copy_from_slice(&series[..n - periods]);
    result
}

/// `series[i] - series[i - periods]`, `NaN` where the lag is undefined.
pub fn difference(series: &[f64], periods: usize) -> Vec<f64> {
    series
        .iter()
        .zip(shift(series, periods))
        .map(|(x, lagged)| x - lagged)
        .collect()
}

/// Natural log of each value.
///
/// Returns the index of the first non-positive or non-finite value as
/// `Err`; `NaN` entries are treated as missing and stay `NaN`.
pub fn log_positive(series: &[f64]) -> std::result::Result<Vec<f64>, usize> {
    series
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if x.is_nan() {
                Ok(f64::NAN)
            } else if x > 0.0 && x.is_finite() {
                Ok(x.ln())
            } else {
                Err(i)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shift_pads_with_nan() {
        let shifted = shift(&[1.0, 2.0, 3.0, 4.0], 1);
        assert!(shifted[0].is_nan());
        assert_eq!(&shifted[1..], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn shift_beyond_length_is_all_nan() {
        assert!(shift(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
        assert!(shift(&[], 1).is_empty());
    }

    #[test]
    fn shift_by_zero_is_identity() {
        assert_eq!(shift(&[1.0, 2.0], 0), vec![1.0, 2.0]);
    }

    #[test]
    fn difference_propagates_missing() {
        let d = difference(&[1.0, 3.0, f64::NAN, 10.0], 1);
        assert!(d[0].is_nan());
        assert_relative_eq!(d[1], 2.0);
        assert!(d[2].is_nan());
        assert!(d[3].is_nan());
    }

    #[test]
    fn log_positive_rejects_non_positive() {
        assert_eq!(log_positive(&[1.0, 0.0, 2.0]), Err(1));
        assert_eq!(log_positive(&[1.0, -3.0]), Err(1));
        assert_eq!(log_positive(&[f64::INFINITY]), Err(0));
    }

    #[test]
    fn log_positive_keeps_missing() {
        let logs = log_positive(&[std::f64::consts::E, f64::NAN]).unwrap();
        assert_relative_eq!(logs[0], 1.0, epsilon = 1e-12);
        assert!(logs[1].is_nan());
    }
}
