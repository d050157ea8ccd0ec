//! Autoregressive models with optional exogenous regressors, fitted by OLS.

use crate::error::{BacktestError, Result};
use crate::features::{FeatureColumn, FeatureRow};
use crate::models::{Forecaster, ModelKind};
use crate::utils::ols::{ols_fit, OLSResult};

/// Linear regression of `y` on the predictor columns of a [`ModelKind`].
#[derive(Debug, Clone)]
pub struct LinearAutoregression {
    kind: ModelKind,
    ols: Option<OLSResult>,
}

impl LinearAutoregression {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind, ols: None }
    }

    /// Predictor columns, in coefficient order.
    pub fn predictors(&self) -> &'static [FeatureColumn] {
        self.kind.predictors()
    }
}

impl Forecaster for LinearAutoregression {
    fn fit(&mut self, train: &[FeatureRow]) -> Result<()> {
        let y: Vec<f64> = train.iter().map(|r| r.y).collect();
        let columns: Vec<Vec<f64>> = self
            .predictors()
            .iter()
            .map(|&col| train.iter().map(|r| r.get(col)).collect())
            .collect();

        self.ols = Some(ols_fit(&y, &columns)?);
        Ok(())
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        let ols = self.ols.as_ref().ok_or_else(|| {
            BacktestError::InvalidParameter(format!(
                "model '{}' must be fitted before prediction",
                self.kind.name()
            ))
        })?;

        let x: Vec<f64> = self.predictors().iter().map(|&col| row.get(col)).collect();
        ols.predict_one(&x)
    }

    fn name(&self) -> &str {
        self.kind.name()
    }

    fn is_fitted(&self) -> bool {
        self.ols.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add_months;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    /// Rows where y = 0.5 + 0.8 * y_lag1 + 0.3 * log_regressor_lag1 exactly.
    fn exact_rows(n: usize) -> Vec<FeatureRow> {
        let start = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let y_lag1 = 4.0 + (i as f64 * 0.9).sin();
                let log_regressor_lag1 = 12.0 + (i as f64 * 0.37).cos();
                let yoy = (i as f64 * 0.21).sin() * 0.05;
                FeatureRow {
                    date: add_months(start, i as u32).unwrap(),
                    y: 0.5 + 0.8 * y_lag1 + 0.3 * log_regressor_lag1,
                    y_lag1,
                    log_regressor: log_regressor_lag1 + 0.01,
                    log_regressor_lag1,
                    yoy_log_regressor: yoy + 0.001,
                    yoy_log_regressor_lag1: yoy,
                }
            })
            .collect()
    }

    #[test]
    fn arx_level_reproduces_exact_relationship_out_of_sample() {
        let rows = exact_rows(40);
        let mut model = LinearAutoregression::new(ModelKind::ArxLevel);
        model.fit(&rows[..30]).unwrap();

        for test in &rows[30..] {
            assert_relative_eq!(model.predict(test).unwrap(), test.y, epsilon = 1e-8);
        }
    }

    #[test]
    fn ar1_ignores_the_regressor_columns() {
        let model = LinearAutoregression::new(ModelKind::Ar1);
        assert_eq!(model.predictors(), &[FeatureColumn::YLag1]);

        let mut model = model;
        model.fit(&exact_rows(25)).unwrap();

        let row = exact_rows(26)[25];
        let mut shifted = row;
        shifted.log_regressor_lag1 += 5.0;
        shifted.yoy_log_regressor_lag1 -= 1.0;
        assert_eq!(model.predict(&row).unwrap(), model.predict(&shifted).unwrap());
    }

    #[test]
    fn refit_replaces_earlier_coefficients() {
        let rows = exact_rows(40);
        let mut model = LinearAutoregression::new(ModelKind::ArxYoy);
        model.fit(&rows[..20]).unwrap();
        let first = model.predict(&rows[39]).unwrap();

        let mut fresh = LinearAutoregression::new(ModelKind::ArxYoy);
        fresh.fit(&rows[..35]).unwrap();
        model.fit(&rows[..35]).unwrap();

        assert!(model.is_fitted());
        assert_eq!(model.predict(&rows[39]).unwrap(), fresh.predict(&rows[39]).unwrap());
        assert!(first.is_finite());
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = LinearAutoregression::new(ModelKind::ArxYoy);
        assert!(!model.is_fitted());
        assert!(model.predict(&exact_rows(1)[0]).is_err());
    }

    #[test]
    fn degenerate_training_set_is_numerical_error() {
        let mut rows = exact_rows(10);
        for row in &mut rows {
            row.y_lag1 = 3.0;
        }
        let mut model = LinearAutoregression::new(ModelKind::Ar1);
        assert!(matches!(
            model.fit(&rows),
            Err(BacktestError::Numerical(_))
        ));
    }
}
