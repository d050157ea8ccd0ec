//! Forecasting models.

mod kind;
mod linear;
mod naive;
mod traits;

pub use kind::ModelKind;
pub use linear::LinearAutoregression;
pub use naive::NaiveLag;
pub use traits::{BoxedForecaster, Forecaster};
