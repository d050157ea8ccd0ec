//! Backtest configuration.
//!
//! All paths and options are passed explicitly to
//! [`pipeline::run`](crate::pipeline::run); nothing is read from
//! process-wide state. A configuration can be built in code or loaded from
//! a TOML file:
//!
//! ```toml
//! panel_path = "data/processed/panel_monthly.csv"
//! output_dir = "results"
//! initial_train_size = 60
//! lag_policy = "positional"
//! break_date = "2020-03-01"
//!
//! [columns]
//! target = "unemployment_rate"
//! regressor = "upt"
//! ```

use crate::backtest::DEFAULT_INITIAL_TRAIN_SIZE;
use crate::error::{BacktestError, Result};
use crate::features::LagPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Names of the panel columns mapped onto date/target/regressor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_date_column")]
    pub date: String,
    #[serde(default = "default_target_column")]
    pub target: String,
    #[serde(default = "default_regressor_column")]
    pub regressor: String,
}

fn default_date_column() -> String {
    "date".to_string()
}
fn default_target_column() -> String {
    "target".to_string()
}
fn default_regressor_column() -> String {
    "regressor".to_string()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date: default_date_column(),
            target: default_target_column(),
            regressor: default_regressor_column(),
        }
    }
}

impl ColumnMapping {
    pub fn new(date: &str, target: &str, regressor: &str) -> Self {
        Self {
            date: date.to_string(),
            target: target.to_string(),
            regressor: regressor.to_string(),
        }
    }
}

/// Everything needed to run one backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Monthly panel CSV.
    pub panel_path: PathBuf,
    /// Directory receiving the result tables (created if missing).
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_initial_train_size")]
    pub initial_train_size: usize,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub lag_policy: LagPolicy,
    /// Optional structural break for pre/post metrics.
    #[serde(default)]
    pub break_date: Option<NaiveDate>,
    #[serde(default)]
    pub parallel: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}
fn default_initial_train_size() -> usize {
    DEFAULT_INITIAL_TRAIN_SIZE
}

impl BacktestConfig {
    /// Configuration with defaults for everything except the panel path.
    pub fn new<P: Into<PathBuf>>(panel_path: P) -> Self {
        Self {
            panel_path: panel_path.into(),
            output_dir: default_output_dir(),
            initial_train_size: default_initial_train_size(),
            columns: ColumnMapping::default(),
            lag_policy: LagPolicy::default(),
            break_date: None,
            parallel: false,
        }
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_initial_train_size(mut self, size: usize) -> Self {
        self.initial_train_size = size;
        self
    }

    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_lag_policy(mut self, policy: LagPolicy) -> Self {
        self.lag_policy = policy;
        self
    }

    pub fn with_break_date(mut self, date: NaiveDate) -> Self {
        self.break_date = Some(date);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BacktestError::Io(format!("failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check option values that the type system does not.
    pub fn validate(&self) -> Result<()> {
        if self.initial_train_size == 0 {
            return Err(BacktestError::InvalidParameter(
                "initial_train_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn predictions_path(&self) -> PathBuf {
        self.output_dir.join("backtest_predictions.csv")
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.output_dir.join("backtest_metrics.csv")
    }

    pub fn period_metrics_path(&self) -> PathBuf {
        self.output_dir.join("backtest_metrics_by_period.csv")
    }
}
