//! Forecaster trait defining the one-step-ahead interface for all models.

use crate::error::Result;
use crate::features::FeatureRow;

/// Common interface for one-step-ahead models over feature rows.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model on training rows, replacing any earlier fit.
    fn fit(&mut self, train: &[FeatureRow]) -> Result<()>;

    /// Predict `y` for a single row from its lagged predictors.
    fn predict(&self, row: &FeatureRow) -> Result<f64>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use nowcast_backtest::models::{BoxedForecaster, Forecaster, NaiveLag};
///
/// let model: BoxedForecaster = Box::new(NaiveLag::new());
/// assert_eq!(model.name(), "naive");
/// ```
pub type BoxedForecaster = Box<dyn Forecaster + Send + Sync>;
