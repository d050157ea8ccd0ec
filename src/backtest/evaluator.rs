//! Expanding-window (walk-forward) evaluation.
//!
//! At step `t` every model is refit from scratch on feature rows `[0, t)`
//! and predicts row `t`. The training window always starts at the first
//! row and grows by one row per step; it never slides and never includes
//! the test row or anything after it.

use crate::backtest::PredictionRow;
use crate::error::{BacktestError, Result};
use crate::features::{FeatureFrame, FeatureRow};
use crate::models::ModelKind;

/// Five years of monthly observations.
pub const DEFAULT_INITIAL_TRAIN_SIZE: usize = 60;

/// Configuration of the expanding-window evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandingWindow {
    /// Number of rows in the first training window.
    pub initial_train_size: usize,
    /// Fan the steps out across threads (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for ExpandingWindow {
    fn default() -> Self {
        Self {
            initial_train_size: DEFAULT_INITIAL_TRAIN_SIZE,
            parallel: false,
        }
    }
}

/// One evaluated step together with the training-window size it used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationStep {
    /// Index of the test row in the feature frame.
    pub index: usize,
    /// Number of rows the models were fitted on.
    pub train_size: usize,
    pub prediction: PredictionRow,
}

impl ExpandingWindow {
    pub fn new(initial_train_size: usize) -> Self {
        Self {
            initial_train_size,
            ..Self::default()
        }
    }

    /// Enable or disable the parallel fan-out.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of test points a frame of `frame_len` rows yields.
    pub fn n_steps(&self, frame_len: usize) -> usize {
        frame_len.saturating_sub(self.initial_train_size)
    }

    /// Run the backtest, returning one prediction row per test date.
    ///
    /// Returns an empty vector when the frame has no more rows than the
    /// initial training window.
    pub fn evaluate(&self, frame: &FeatureFrame) -> Result<Vec<PredictionRow>> {
        Ok(self
            .evaluate_with_trace(frame)?
            .into_iter()
            .map(|step| step.prediction)
            .collect())
    }

    /// Like [`evaluate`](Self::evaluate), keeping each step's index and
    /// training size.
    pub fn evaluate_with_trace(&self, frame: &FeatureFrame) -> Result<Vec<EvaluationStep>> {
        if self.initial_train_size == 0 {
            return Err(BacktestError::InvalidParameter(
                "initial_train_size must be positive".to_string(),
            ));
        }

        let rows = frame.rows();
        if self.n_steps(rows.len()) == 0 {
            tracing::warn!(
                feature_rows = rows.len(),
                initial_train_size = self.initial_train_size,
                "not enough feature rows for a single evaluation step"
            );
            return Ok(Vec::new());
        }

        let steps = self.initial_train_size..rows.len();
        tracing::info!(
            steps = steps.len(),
            initial_train_size = self.initial_train_size,
            parallel = self.parallel,
            "running expanding-window backtest"
        );

        if self.parallel {
            run_parallel(rows, steps)
        } else {
            steps.map(|t| evaluate_step(rows, t)).collect()
        }
    }
}

/// Evaluate with the default window options.
///
/// # Example
/// ```
/// use nowcast_backtest::backtest::evaluate;
/// use nowcast_backtest::features::FeatureFrame;
///
/// let predictions = evaluate(&FeatureFrame::default(), 60).unwrap();
/// assert!(predictions.is_empty());
/// ```
pub fn evaluate(frame: &FeatureFrame, initial_train_size: usize) -> Result<Vec<PredictionRow>> {
    ExpandingWindow::new(initial_train_size).evaluate(frame)
}

/// Fit every model on rows `[0, t)` and predict row `t`.
fn evaluate_step(rows: &[FeatureRow], t: usize) -> Result<EvaluationStep> {
    let train = &rows[..t];
    let test = &rows[t];

    let mut y_hat = [0.0; ModelKind::ALL.len()];
    for kind in ModelKind::ALL {
        let mut model = kind.create();
        let prediction = model
            .fit(train)
            .and_then(|_| model.predict(test))
            .map_err(|err| match err {
                BacktestError::Numerical(msg) => BacktestError::Numerical(format!(
                    "{} (model {}, test date {})",
                    msg, kind, test.date
                )),
                other => other,
            })?;
        y_hat[kind.index()] = prediction;
    }

    tracing::debug!(date = %test.date, train_size = t, "evaluated step");

    Ok(EvaluationStep {
        index: t,
        train_size: train.len(),
        prediction: PredictionRow::new(test.date, test.y, y_hat),
    })
}

#[cfg(feature = "parallel")]
fn run_parallel(
    rows: &[FeatureRow],
    steps: std::ops::Range<usize>,
) -> Result<Vec<EvaluationStep>> {
    use rayon::prelude::*;

    // Indexed collect keeps ascending step order.
    steps
        .into_par_iter()
        .map(|t| evaluate_step(rows, t))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    rows: &[FeatureRow],
    steps: std::ops::Range<usize>,
) -> Result<Vec<EvaluationStep>> {
    tracing::warn!("built without the `parallel` feature; evaluating sequentially");
    steps.map(|t| evaluate_step(rows, t)).collect()
}
