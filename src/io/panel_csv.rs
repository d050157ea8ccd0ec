//! Reading the monthly panel from a delimited table.

use crate::config::ColumnMapping;
use crate::core::{Panel, PanelRow};
use crate::error::{BacktestError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parse a month from `YYYY-MM-DD`, `YYYY-MM`, `YYYY-MM-DD HH:MM:SS` or an
/// RFC 3339 timestamp. The day and time are discarded by the caller's
/// month normalization.
pub fn parse_month(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
        return Ok(d);
    }
    Err(BacktestError::DataError(format!(
        "could not parse '{}' as an ISO-8601 date",
        raw
    )))
}

/// Parse an optional number; an empty cell is a missing value.
pub(crate) fn parse_optional_f64(raw: &str, column: &str, line: u64) -> Result<Option<f64>> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s == "." {
        return Ok(None);
    }
    s.parse::<f64>().map(Some).map_err(|_| {
        BacktestError::DataError(format!(
            "line {}: column '{}' value '{}' is not a number",
            line, column, raw
        ))
    })
}

/// Locate a named column in the header row.
pub(crate) fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| BacktestError::DataError(format!("missing required column '{}'", name)))
}

/// Read a panel from CSV text, dropping rows with a missing target or
/// regressor.
pub fn read_panel<R: Read>(reader: R, columns: &ColumnMapping) -> Result<Panel> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let date_idx = column_index(&headers, &columns.date)?;
    let target_idx = column_index(&headers, &columns.target)?;
    let regressor_idx = column_index(&headers, &columns.regressor)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = parse_month(field(date_idx))?;
        let target = parse_optional_f64(field(target_idx), &columns.target, line)?;
        let regressor = parse_optional_f64(field(regressor_idx), &columns.regressor, line)?;

        match (target, regressor) {
            (Some(t), Some(r)) => rows.push(PanelRow::new(date, t, r)),
            _ => dropped += 1,
        }
    }

    tracing::info!(
        rows = rows.len(),
        dropped_missing = dropped,
        "loaded monthly panel"
    );

    Ok(Panel::new(rows))
}

/// Read a panel from a CSV file.
pub fn read_panel_file<P: AsRef<Path>>(path: P, columns: &ColumnMapping) -> Result<Panel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        BacktestError::Io(format!("failed to open panel {}: {}", path.display(), e))
    })?;
    read_panel(file, columns)
}
