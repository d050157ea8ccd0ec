//! # nowcast-backtest
//!
//! Expanding-window backtest of one-step-ahead monthly nowcasts.
//!
//! A monthly panel of a target series and one exogenous regressor is turned
//! into lagged features (target level, log regressor level, year-over-year
//! log regressor change). Four models are refit at every evaluation date on
//! all strictly earlier rows and each predicts the target for that date:
//!
//! - `naive`: last month's target
//! - `ar1`: OLS on the lagged target
//! - `arx_level`: OLS on the lagged target and lagged log regressor
//! - `arx_yoy`: OLS on the lagged target and lagged YoY log change
//!
//! Errors are summarized as MAE and RMSE per model, optionally split at a
//! structural break date.

#![allow(clippy::needless_range_loop)]

pub mod backtest;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod transform;
pub mod utils;

pub use error::{BacktestError, Result};

pub mod prelude {
    pub use crate::backtest::{
        evaluate, summarize_models, ExpandingWindow, MetricRecord, PredictionRow,
    };
    pub use crate::config::{BacktestConfig, ColumnMapping};
    pub use crate::core::{Panel, PanelRow};
    pub use crate::error::{BacktestError, Result};
    pub use crate::features::{build_features, FeatureFrame, LagPolicy};
    pub use crate::models::{Forecaster, ModelKind};
    pub use crate::utils::{summarize, ErrorSummary};
}
