//! Monthly panel of target and regressor observations.

use crate::error::{BacktestError, Result};
use chrono::{Datelike, NaiveDate};

/// A single monthly observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRow {
    /// Month of the observation, normalized to the first day of the month.
    pub date: NaiveDate,
    /// Observed target rate.
    pub target: f64,
    /// Observed regressor count (strictly positive in raw form).
    pub regressor: f64,
}

impl PanelRow {
    /// Create a row, normalizing `date` to the start of its month.
    pub fn new(date: NaiveDate, target: f64, regressor: f64) -> Self {
        Self {
            date: month_start(date),
            target,
            regressor,
        }
    }
}

/// Monthly panel as delivered by the loader.
///
/// Rows may arrive in any order; [`Panel::sorted_rows`] yields the
/// chronological view the feature builder works on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    rows: Vec<PanelRow>,
}

impl Panel {
    pub fn new(rows: Vec<PanelRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| PanelRow::new(r.date, r.target, r.regressor))
            .collect();
        Self { rows }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in the order they were supplied.
    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    /// Rows sorted ascending by month.
    ///
    /// Fails with `DataError` if two rows fall in the same month.
    pub fn sorted_rows(&self) -> Result<Vec<PanelRow>> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| r.date);

        for pair in rows.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(BacktestError::DataError(format!(
                    "duplicate panel month {}",
                    pair[1].date
                )));
            }
        }

        Ok(rows)
    }
}

impl FromIterator<PanelRow> for Panel {
    fn from_iter<I: IntoIterator<Item = PanelRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whole months from `from` to `to` (negative when `to` is earlier).
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

/// The month `n` months after `date`'s month.
pub fn add_months(date: NaiveDate, n: u32) -> Option<NaiveDate> {
    month_start(date).checked_add_months(chrono::Months::new(n))
}
