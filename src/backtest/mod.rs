//! Expanding-window backtest and its summaries.
//!
//! # Example
//!
//! ```
//! use nowcast_backtest::backtest::{evaluate, summarize_models};
//! use nowcast_backtest::core::{add_months, Panel, PanelRow};
//! use nowcast_backtest::features::build_features;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let panel: Panel = (0..60u32)
//!     .map(|i| {
//!         let t = i as f64;
//!         PanelRow::new(
//!             add_months(start, i).unwrap(),
//!             5.0 + (t * 0.3).sin(),
//!             1000.0 + 50.0 * (t * 0.2).cos() + t,
//!         )
//!     })
//!     .collect();
//!
//! let frame = build_features(&panel).unwrap();
//! let predictions = evaluate(&frame, 24).unwrap();
//! assert_eq!(predictions.len(), frame.len() - 24);
//!
//! let metrics = summarize_models(&predictions).unwrap();
//! assert_eq!(metrics.len(), 4);
//! ```

mod evaluator;
mod prediction;
mod summary;

pub use evaluator::{evaluate, EvaluationStep, ExpandingWindow, DEFAULT_INITIAL_TRAIN_SIZE};
pub use prediction::{model_errors, PredictionRow};
pub use summary::{
    summarize_by_period, summarize_models, MetricRecord, Period, PeriodMetricRecord,
};
