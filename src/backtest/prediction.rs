//! One-step-ahead prediction record.

use crate::models::ModelKind;
use chrono::NaiveDate;

const N_MODELS: usize = ModelKind::ALL.len();

/// True value and every model's prediction for one evaluation month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRow {
    pub date: NaiveDate,
    pub y_true: f64,
    y_hat: [f64; N_MODELS],
    err: [f64; N_MODELS],
}

impl PredictionRow {
    /// Package predictions indexed by [`ModelKind::index`].
    pub fn new(date: NaiveDate, y_true: f64, y_hat: [f64; N_MODELS]) -> Self {
        let err = y_hat.map(|p| y_true - p);
        Self {
            date,
            y_true,
            y_hat,
            err,
        }
    }

    pub fn y_hat(&self, model: ModelKind) -> f64 {
        self.y_hat[model.index()]
    }

    /// `y_true - y_hat` for the model.
    pub fn error(&self, model: ModelKind) -> f64 {
        self.err[model.index()]
    }
}

/// Errors of one model across a sequence of predictions, in order.
pub fn model_errors(predictions: &[PredictionRow], model: ModelKind) -> Vec<f64> {
    predictions.iter().map(|p| p.error(model)).collect()
}
