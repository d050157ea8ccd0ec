//! Per-model accuracy summaries of a completed backtest.

use crate::backtest::{model_errors, PredictionRow};
use crate::error::Result;
use crate::models::ModelKind;
use crate::utils::metrics::summarize;
use chrono::NaiveDate;

/// MAE and RMSE of one model over all evaluation dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRecord {
    pub model: ModelKind,
    pub mae: f64,
    pub rmse: f64,
}

/// Side of a structural break a prediction falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Period {
    /// Dates strictly before the break.
    Pre,
    /// Dates on or after the break.
    Post,
}

impl Period {
    pub fn name(self) -> &'static str {
        match self {
            Period::Pre => "pre",
            Period::Post => "post",
        }
    }
}

/// Metrics of one model restricted to one side of a break date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodMetricRecord {
    pub period: Period,
    pub model: ModelKind,
    /// Number of predictions in the period.
    pub n: usize,
    pub mae: f64,
    pub rmse: f64,
}

/// One record per model, in [`ModelKind::ALL`] order.
///
/// Fails with `EmptyInput` when `predictions` is empty.
pub fn summarize_models(predictions: &[PredictionRow]) -> Result<Vec<MetricRecord>> {
    ModelKind::ALL
        .iter()
        .map(|&model| {
            let summary = summarize(&model_errors(predictions, model))?;
            Ok(MetricRecord {
                model,
                mae: summary.mae,
                rmse: summary.rmse,
            })
        })
        .collect()
}

/// Split predictions at `break_date` and summarize each non-empty side.
///
/// Records are ordered by period, then by model.
pub fn summarize_by_period(
    predictions: &[PredictionRow],
    break_date: NaiveDate,
) -> Result<Vec<PeriodMetricRecord>> {
    let (pre, post): (Vec<PredictionRow>, Vec<PredictionRow>) =
        predictions.iter().copied().partition(|p| p.date < break_date);

    let mut records = Vec::new();
    for (period, rows) in [(Period::Pre, pre), (Period::Post, post)] {
        if rows.is_empty() {
            continue;
        }
        for metric in summarize_models(&rows)? {
            records.push(PeriodMetricRecord {
                period,
                model: metric.model,
                n: rows.len(),
                mae: metric.mae,
                rmse: metric.rmse,
            });
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BacktestError;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn rows() -> Vec<PredictionRow> {
        // Naive errors: 1, -1, 2, -2
        vec![
            PredictionRow::new(date(2019, 12), 5.0, [4.0, 5.0, 5.5, 5.0]),
            PredictionRow::new(date(2020, 1), 5.0, [6.0, 5.0, 5.5, 5.0]),
            PredictionRow::new(date(2020, 3), 9.0, [7.0, 8.0, 9.5, 9.0]),
            PredictionRow::new(date(2020, 4), 12.0, [14.0, 11.0, 12.5, 12.0]),
        ]
    }

    #[test]
    fn metrics_follow_fixed_model_order() {
        let metrics = summarize_models(&rows()).unwrap();
        let models: Vec<ModelKind> = metrics.iter().map(|m| m.model).collect();
        assert_eq!(models, ModelKind::ALL.to_vec());
    }

    #[test]
    fn naive_metrics_match_hand_computation() {
        let metrics = summarize_models(&rows()).unwrap();

        assert_relative_eq!(metrics[0].mae, 1.5, epsilon = 1e-12);
        assert_relative_eq!(metrics[0].rmse, 2.5f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(metrics[3].mae, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_predictions_are_rejected() {
        assert!(matches!(
            summarize_models(&[]),
            Err(BacktestError::EmptyInput)
        ));
    }

    #[test]
    fn period_split_at_break_date() {
        let records = summarize_by_period(&rows(), date(2020, 3)).unwrap();
        assert_eq!(records.len(), 8);

        let pre_naive = records[0];
        assert_eq!(pre_naive.period, Period::Pre);
        assert_eq!(pre_naive.model, ModelKind::Naive);
        assert_eq!(pre_naive.n, 2);
        assert_relative_eq!(pre_naive.mae, 1.0, epsilon = 1e-12);

        let post_naive = records[4];
        assert_eq!(post_naive.period, Period::Post);
        assert_relative_eq!(post_naive.mae, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_period_is_skipped() {
        let records = summarize_by_period(&rows(), date(2000, 1)).unwrap();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.period == Period::Post));
        assert!(summarize_by_period(&[], date(2000, 1)).unwrap().is_empty());
    }
}
