//! End-to-end backtest run: load, build features, evaluate, summarize, write.

use crate::backtest::{
    summarize_by_period, summarize_models, ExpandingWindow, MetricRecord, PeriodMetricRecord,
    PredictionRow,
};
use crate::config::BacktestConfig;
use crate::core::Panel;
use crate::error::{BacktestError, Result};
use crate::features::build_features_with;
use crate::io;
use std::path::PathBuf;

/// Everything a run produced, plus where it was written.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    pub panel_rows: usize,
    pub feature_rows: usize,
    pub predictions: Vec<PredictionRow>,
    pub metrics: Vec<MetricRecord>,
    pub period_metrics: Option<Vec<PeriodMetricRecord>>,
    pub written: Vec<PathBuf>,
}

/// Results of the in-memory stages, before anything is written.
#[derive(Debug, Clone)]
pub struct BacktestOutcome {
    pub feature_rows: usize,
    pub predictions: Vec<PredictionRow>,
    pub metrics: Vec<MetricRecord>,
    pub period_metrics: Option<Vec<PeriodMetricRecord>>,
}

/// Feature builder, evaluator and summarizer, in that order.
pub fn backtest_panel(panel: &Panel, config: &BacktestConfig) -> Result<BacktestOutcome> {
    config.validate()?;

    let frame = build_features_with(panel, config.lag_policy)?;
    tracing::info!(
        panel_rows = panel.len(),
        feature_rows = frame.len(),
        "built feature frame"
    );

    let window = ExpandingWindow::new(config.initial_train_size).with_parallel(config.parallel);
    let predictions = window.evaluate(&frame)?;

    let metrics = summarize_models(&predictions)?;
    let period_metrics = config
        .break_date
        .map(|date| summarize_by_period(&predictions, date))
        .transpose()?;

    for m in &metrics {
        tracing::info!(model = %m.model, mae = m.mae, rmse = m.rmse, "model accuracy");
    }

    Ok(BacktestOutcome {
        feature_rows: frame.len(),
        predictions,
        metrics,
        period_metrics,
    })
}

/// Run the full backtest described by `config` and write its tables.
pub fn run(config: &BacktestConfig) -> Result<BacktestReport> {
    config.validate()?;

    let panel = io::read_panel_file(&config.panel_path, &config.columns)?;
    let outcome = backtest_panel(&panel, config)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        BacktestError::Io(format!(
            "failed to create output directory {}: {}",
            config.output_dir.display(),
            e
        ))
    })?;

    let mut written = Vec::new();

    let path = config.predictions_path();
    io::write_to_file(&path, |f| io::write_predictions(&outcome.predictions, f))?;
    written.push(path);

    let path = config.metrics_path();
    io::write_to_file(&path, |f| io::write_metrics(&outcome.metrics, f))?;
    written.push(path);

    if let Some(period_metrics) = &outcome.period_metrics {
        let path = config.period_metrics_path();
        io::write_to_file(&path, |f| io::write_period_metrics(period_metrics, f))?;
        written.push(path);
    }

    Ok(BacktestReport {
        panel_rows: panel.len(),
        feature_rows: outcome.feature_rows,
        predictions: outcome.predictions,
        metrics: outcome.metrics,
        period_metrics: outcome.period_metrics,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{add_months, PanelRow};
    use chrono::NaiveDate;

    fn panel(n: u32) -> Panel {
        let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let t = i as f64;
                PanelRow::new(
                    add_months(start, i).unwrap(),
                    6.0 + (t * 0.25).sin() + 0.01 * t,
                    2.0e6 * (1.0 + 0.1 * (t * 0.4).cos()),
                )
            })
            .collect()
    }

    #[test]
    fn backtest_panel_runs_all_stages() {
        let config = BacktestConfig::new("unused.csv").with_initial_train_size(24);
        let outcome = backtest_panel(&panel(60), &config).unwrap();

        assert_eq!(outcome.feature_rows, 47);
        assert_eq!(outcome.predictions.len(), 47 - 24);
        assert_eq!(outcome.metrics.len(), 4);
        assert!(outcome.period_metrics.is_none());
    }

    #[test]
    fn too_little_data_surfaces_empty_input() {
        let config = BacktestConfig::new("unused.csv");
        assert!(matches!(
            backtest_panel(&panel(18), &config),
            Err(BacktestError::EmptyInput)
        ));
    }

    #[test]
    fn break_date_adds_period_metrics() {
        let config = BacktestConfig::new("unused.csv")
            .with_initial_train_size(24)
            .with_break_date(NaiveDate::from_ymd_opt(2005, 1, 1).unwrap());
        let outcome = backtest_panel(&panel(60), &config).unwrap();

        let periods = outcome.period_metrics.unwrap();
        assert_eq!(periods.len(), 8);
    }
}
