//! Naive forecasting model.
//!
//! The naive method forecasts the previous month's observed value, read
//! straight from the row's `y_lag1` column. Nothing is estimated.

use crate::error::Result;
use crate::features::FeatureRow;
use crate::models::Forecaster;

/// Naive forecaster that repeats the last observed value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveLag;

impl NaiveLag {
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for NaiveLag {
    fn fit(&mut self, _train: &[FeatureRow]) -> Result<()> {
        Ok(())
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        Ok(row.y_lag1)
    }

    fn name(&self) -> &str {
        "naive"
    }

    fn is_fitted(&self) -> bool {
        true
    }
}
