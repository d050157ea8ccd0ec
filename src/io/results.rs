//! Writing prediction and metric tables.
//!
//! Numbers use Rust's shortest round-trip formatting, so identical inputs
//! always produce byte-identical files.

use crate::backtest::{MetricRecord, PeriodMetricRecord, PredictionRow};
use crate::error::{BacktestError, Result};
use crate::models::ModelKind;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header of the predictions table.
pub fn prediction_header() -> Vec<String> {
    let mut header = vec!["date".to_string(), "y_true".to_string()];
    header.extend(ModelKind::ALL.iter().map(|m| format!("y_hat_{}", m.name())));
    header.extend(ModelKind::ALL.iter().map(|m| format!("err_{}", m.name())));
    header
}

/// Write one row per evaluation date in the given (ascending) order.
pub fn write_predictions<W: Write>(predictions: &[PredictionRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(prediction_header())?;

    for p in predictions {
        let mut record = vec![p.date.format("%Y-%m-%d").to_string(), p.y_true.to_string()];
        record.extend(ModelKind::ALL.iter().map(|&m| p.y_hat(m).to_string()));
        record.extend(ModelKind::ALL.iter().map(|&m| p.error(m).to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write `model,mae,rmse`, one row per model.
pub fn write_metrics<W: Write>(metrics: &[MetricRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["model", "mae", "rmse"])?;

    for m in metrics {
        wtr.write_record([m.model.name().to_string(), m.mae.to_string(), m.rmse.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write `period,model,n,mae,rmse`.
pub fn write_period_metrics<W: Write>(metrics: &[PeriodMetricRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["period", "model", "n", "mae", "rmse"])?;

    for m in metrics {
        wtr.write_record([
            m.period.name().to_string(),
            m.model.name().to_string(),
            m.n.to_string(),
            m.mae.to_string(),
            m.rmse.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Create `path` and hand it to a table writer.
pub fn write_to_file<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(File) -> Result<()>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        BacktestError::Io(format!("failed to create {}: {}", path.display(), e))
    })?;
    write(file)?;
    tracing::info!(path = %path.display(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::Period;
    use chrono::NaiveDate;

    fn sample() -> Vec<PredictionRow> {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        vec![PredictionRow::new(date, 5.5, [5.0, 5.25, 6.0, 5.5])]
    }

    #[test]
    fn prediction_header_is_fixed() {
        assert_eq!(
            prediction_header().join(","),
            "date,y_true,y_hat_naive,y_hat_ar1,y_hat_arx_level,y_hat_arx_yoy,\
             err_naive,err_ar1,err_arx_level,err_arx_yoy"
        );
    }

    #[test]
    fn predictions_table_contents() {
        let mut buf = Vec::new();
        write_predictions(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2021-01-01,5.5,5,5.25,6,5.5,0.5,0.25,-0.5,0");
    }

    #[test]
    fn metrics_table_contents() {
        let metrics = vec![MetricRecord {
            model: ModelKind::Ar1,
            mae: 0.25,
            rmse: 0.5,
        }];
        let mut buf = Vec::new();
        write_metrics(&metrics, &mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "model,mae,rmse\nar1,0.25,0.5\n");
    }

    #[test]
    fn period_metrics_table_contents() {
        let metrics = vec![PeriodMetricRecord {
            period: Period::Post,
            model: ModelKind::Naive,
            n: 3,
            mae: 1.0,
            rmse: 2.0,
        }];
        let mut buf = Vec::new();
        write_period_metrics(&metrics, &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "period,model,n,mae,rmse\npost,naive,3,1,2\n"
        );
    }

    #[test]
    fn empty_predictions_write_header_only() {
        let mut buf = Vec::new();
        write_predictions(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
