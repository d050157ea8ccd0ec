//! Lagged and log-transformed feature frame built from a monthly panel.
//!
//! Every predictor column in a [`FeatureRow`] is computed from observations
//! strictly before the row's own month, so fitting on earlier rows and
//! predicting the current one never looks ahead.

use crate::core::{months_between, Panel, PanelRow};
use crate::error::{BacktestError, Result};
use crate::transform::lag::{difference, log_positive, shift};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of periods in the year-over-year difference.
pub const YOY_PERIODS: usize = 12;

/// How lags treat months that are absent from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LagPolicy {
    /// Shift by row position after sorting. A missing month makes the lag
    /// reach the nearest earlier row that is present.
    #[default]
    Positional,
    /// Reindex onto a continuous monthly calendar first. Lags that land on
    /// a missing month are undefined and the affected rows are dropped.
    Calendar,
}

impl std::str::FromStr for LagPolicy {
    type Err = BacktestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "positional" => Ok(LagPolicy::Positional),
            "calendar" => Ok(LagPolicy::Calendar),
            other => Err(BacktestError::InvalidParameter(format!(
                "unknown lag policy '{}' (expected positional or calendar)",
                other
            ))),
        }
    }
}

/// Lagged columns of a feature row that a model can regress `y` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    YLag1,
    LogRegressorLag1,
    YoyLogRegressorLag1,
}

/// Model-ready observation for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub date: NaiveDate,
    /// Target at t.
    pub y: f64,
    /// Target at t-1.
    pub y_lag1: f64,
    /// ln(regressor) at t.
    pub log_regressor: f64,
    /// ln(regressor) at t-1.
    pub log_regressor_lag1: f64,
    /// ln(regressor) at t minus ln(regressor) at t-12.
    pub yoy_log_regressor: f64,
    /// Year-over-year log change at t-1.
    pub yoy_log_regressor_lag1: f64,
}

impl FeatureRow {
    /// Value of a single predictor column.
    pub fn get(&self, column: FeatureColumn) -> f64 {
        match column {
            FeatureColumn::YLag1 => self.y_lag1,
            FeatureColumn::LogRegressorLag1 => self.log_regressor_lag1,
            FeatureColumn::YoyLogRegressorLag1 => self.yoy_log_regressor_lag1,
        }
    }
}

/// Immutable, date-ordered sequence of feature rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureFrame {
    rows: Vec<FeatureRow>,
}

impl FeatureFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }
}

/// Build the feature frame with positional lags.
pub fn build_features(panel: &Panel) -> Result<FeatureFrame> {
    build_features_with(panel, LagPolicy::Positional)
}

/// Build the feature frame under the given lag policy.
///
/// Rows lacking a full lag history (13 earlier slots) are dropped. A
/// non-positive or non-finite regressor anywhere in the panel is a
/// `DataError`.
pub fn build_features_with(panel: &Panel, policy: LagPolicy) -> Result<FeatureFrame> {
    let sorted = panel.sorted_rows()?;

    for row in &sorted {
        if !row.target.is_finite() {
            return Err(BacktestError::DataError(format!(
                "target at {} is not a finite number",
                row.date
            )));
        }
        if row.regressor.is_nan() {
            return Err(BacktestError::DataError(format!(
                "regressor at {} is missing",
                row.date
            )));
        }
    }

    let slots = match policy {
        LagPolicy::Positional => sorted.into_iter().map(Some).collect(),
        LagPolicy::Calendar => reindex_monthly(&sorted)?,
    };

    let y: Vec<f64> = slots
        .iter()
        .map(|s| s.map_or(f64::NAN, |r| r.target))
        .collect();
    let regressor: Vec<f64> = slots
        .iter()
        .map(|s| s.map_or(f64::NAN, |r| r.regressor))
        .collect();

    let log_regressor = log_positive(&regressor).map_err(|i| {
        let (date, value) = slots[i].map_or((None, f64::NAN), |r| (Some(r.date), r.regressor));
        BacktestError::DataError(format!(
            "regressor must be strictly positive to take its log (got {} at {})",
            value,
            date.map_or_else(|| "unknown date".to_string(), |d| d.to_string())
        ))
    })?;

    let y_lag1 = shift(&y, 1);
    let log_regressor_lag1 = shift(&log_regressor, 1);
    let yoy_log_regressor = difference(&log_regressor, YOY_PERIODS);
    let yoy_log_regressor_lag1 = shift(&yoy_log_regressor, 1);

    let rows: Vec<FeatureRow> = slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            let row = slot.as_ref()?;
            let required = [y[i], y_lag1[i], log_regressor_lag1[i], yoy_log_regressor_lag1[i]];
            if required.iter().any(|v| v.is_nan()) {
                return None;
            }
            Some(FeatureRow {
                date: row.date,
                y: y[i],
                y_lag1: y_lag1[i],
                log_regressor: log_regressor[i],
                log_regressor_lag1: log_regressor_lag1[i],
                yoy_log_regressor: yoy_log_regressor[i],
                yoy_log_regressor_lag1: yoy_log_regressor_lag1[i],
            })
        })
        .collect();

    tracing::debug!(
        panel_rows = panel.len(),
        feature_rows = rows.len(),
        ?policy,
        "derived lagged features"
    );

    Ok(FeatureFrame { rows })
}

/// Lay sorted rows onto a gap-free monthly calendar, `None` marking gaps.
fn reindex_monthly(sorted: &[PanelRow]) -> Result<Vec<Option<PanelRow>>> {
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(f), Some(l)) => (f.date, l.date),
        _ => return Ok(Vec::new()),
    };

    let span = months_between(first, last) as usize + 1;
    let mut slots: Vec<Option<PanelRow>> = vec![None; span];
    for row in sorted {
        let offset = months_between(first, row.date) as usize;
        slots[offset] = Some(*row);
    }

    Ok(slots)
}
