//! Assembling the panel from two single-variable monthly series.
//!
//! Each input is a `date,value` table (the layout time-series download
//! services typically export). Regressor observations falling in the same
//! month are summed, as counts split across several lines or modes would
//! be; the target must have at most one observation per month.

use crate::config::ColumnMapping;
use crate::core::{month_start, Panel, PanelRow};
use crate::error::{BacktestError, Result};
use crate::io::panel_csv::{column_index, parse_month, parse_optional_f64};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// A single observation of a monthly series; `None` marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: chrono::NaiveDate,
    pub value: Option<f64>,
}

/// Read a `date,value` series. Column names are configurable.
pub fn read_series<R: Read>(
    reader: R,
    date_column: &str,
    value_column: &str,
) -> Result<Vec<SeriesPoint>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    let date_idx = column_index(&headers, date_column)?;
    let value_idx = column_index(&headers, value_column)?;

    let mut points = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let date = parse_month(record.get(date_idx).unwrap_or(""))?;
        let value = parse_optional_f64(record.get(value_idx).unwrap_or(""), value_column, line)?;
        points.push(SeriesPoint { date, value });
    }
    Ok(points)
}

/// Read a `date,value` series from a file.
pub fn read_series_file<P: AsRef<Path>>(
    path: P,
    date_column: &str,
    value_column: &str,
) -> Result<Vec<SeriesPoint>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        BacktestError::Io(format!("failed to open series {}: {}", path.display(), e))
    })?;
    read_series(file, date_column, value_column)
}

/// Inner-join target and regressor series on month.
///
/// Months where either side is missing are dropped; the result is sorted
/// by date.
pub fn assemble_panel(target: &[SeriesPoint], regressor: &[SeriesPoint]) -> Result<Panel> {
    let mut target_by_month: BTreeMap<chrono::NaiveDate, Option<f64>> = BTreeMap::new();
    for point in target {
        let month = month_start(point.date);
        if target_by_month.insert(month, point.value).is_some() {
            return Err(BacktestError::DataError(format!(
                "target series has more than one observation for {}",
                month
            )));
        }
    }

    // Sum per month; a month with no observed value at all stays missing.
    let mut regressor_by_month: BTreeMap<chrono::NaiveDate, Option<f64>> = BTreeMap::new();
    for point in regressor {
        let entry = regressor_by_month
            .entry(month_start(point.date))
            .or_insert(None);
        if let Some(v) = point.value {
            *entry = Some(entry.unwrap_or(0.0) + v);
        }
    }

    let rows: Vec<PanelRow> = target_by_month
        .iter()
        .filter_map(|(month, t)| {
            let t = (*t)?;
            let r = regressor_by_month.get(month).copied().flatten()?;
            Some(PanelRow::new(*month, t, r))
        })
        .collect();

    tracing::info!(
        target_months = target_by_month.len(),
        regressor_months = regressor_by_month.len(),
        joined_months = rows.len(),
        "assembled monthly panel"
    );

    Ok(Panel::new(rows))
}

/// Write a panel as `date,<target>,<regressor>` sorted by date.
pub fn write_panel<W: Write>(panel: &Panel, columns: &ColumnMapping, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        columns.date.as_str(),
        columns.target.as_str(),
        columns.regressor.as_str(),
    ])?;

    for row in panel.sorted_rows()? {
        wtr.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.target.to_string(),
            row.regressor.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
