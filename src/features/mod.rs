//! Feature construction for the backtest.
//!
//! Turns a monthly [`Panel`](crate::core::Panel) into a [`FeatureFrame`] of
//! lagged target, log-regressor level and year-over-year log change columns.
//!
//! # Example
//!
//! ```
//! use nowcast_backtest::core::{add_months, Panel, PanelRow};
//! use nowcast_backtest::features::build_features;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
//! let panel: Panel = (0..24)
//!     .map(|i| PanelRow::new(add_months(start, i).unwrap(), 5.0, 1000.0 + i as f64))
//!     .collect();
//!
//! let frame = build_features(&panel).unwrap();
//! assert_eq!(frame.len(), 24 - 13);
//! ```

mod frame;

pub use frame::{
    build_features, build_features_with, FeatureColumn, FeatureFrame, FeatureRow, LagPolicy,
    YOY_PERIODS,
};
