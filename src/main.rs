//! nowcast-backtest command line.
//!
//! `run` executes the expanding-window backtest on a monthly panel and
//! writes the predictions and metrics tables; `assemble` joins two
//! single-variable monthly series into such a panel.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nowcast_backtest::config::{BacktestConfig, ColumnMapping};
use nowcast_backtest::features::LagPolicy;
use nowcast_backtest::{io, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nowcast-backtest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Expanding-window backtest of monthly one-step-ahead nowcasts")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the backtest and write predictions and metrics tables
    Run {
        /// TOML configuration file; command line flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Monthly panel CSV
        #[arg(short, long)]
        panel: Option<PathBuf>,

        /// Directory for the result tables
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Number of leading feature rows used only for training
        #[arg(short, long)]
        initial_train_size: Option<usize>,

        /// Date column name in the panel
        #[arg(long)]
        date_column: Option<String>,

        /// Target column name in the panel
        #[arg(long)]
        target_column: Option<String>,

        /// Regressor column name in the panel
        #[arg(long)]
        regressor_column: Option<String>,

        /// Lag policy (positional, calendar)
        #[arg(long)]
        lag_policy: Option<LagPolicy>,

        /// Split metrics into pre/post periods at this month (YYYY-MM-DD)
        #[arg(long)]
        break_date: Option<NaiveDate>,

        /// Evaluate dates in parallel (needs the `parallel` feature)
        #[arg(long)]
        parallel: bool,
    },

    /// Join a target series and a regressor series into a monthly panel
    Assemble {
        /// Target series CSV
        #[arg(long)]
        target: PathBuf,

        /// Regressor series CSV
        #[arg(long)]
        regressor: PathBuf,

        /// Date column name in both inputs
        #[arg(long, default_value = "date")]
        date_column: String,

        /// Value column name in the target input
        #[arg(long, default_value = "value")]
        target_value_column: String,

        /// Value column name in the regressor input
        #[arg(long, default_value = "value")]
        regressor_value_column: String,

        /// Column names of the written panel as date,target,regressor
        #[arg(long, default_value = "date,target,regressor")]
        panel_columns: String,

        /// Output panel CSV
        #[arg(short, long, default_value = "panel_monthly.csv")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nowcast_backtest=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            panel,
            output_dir,
            initial_train_size,
            date_column,
            target_column,
            regressor_column,
            lag_policy,
            break_date,
            parallel,
        } => {
            let mut cfg = match (config, panel) {
                (Some(path), panel) => {
                    let mut cfg = BacktestConfig::from_toml_file(&path)
                        .with_context(|| format!("loading {}", path.display()))?;
                    if let Some(panel) = panel {
                        cfg.panel_path = panel;
                    }
                    cfg
                }
                (None, Some(panel)) => BacktestConfig::new(panel),
                (None, None) => anyhow::bail!("either --config or --panel is required"),
            };

            if let Some(dir) = output_dir {
                cfg.output_dir = dir;
            }
            if let Some(size) = initial_train_size {
                cfg.initial_train_size = size;
            }
            if let Some(name) = date_column {
                cfg.columns.date = name;
            }
            if let Some(name) = target_column {
                cfg.columns.target = name;
            }
            if let Some(name) = regressor_column {
                cfg.columns.regressor = name;
            }
            if let Some(policy) = lag_policy {
                cfg.lag_policy = policy;
            }
            if break_date.is_some() {
                cfg.break_date = break_date;
            }
            cfg.parallel |= parallel;

            let report = pipeline::run(&cfg)?;

            println!(
                "{} panel rows, {} feature rows, {} predictions",
                report.panel_rows,
                report.feature_rows,
                report.predictions.len()
            );
            for m in &report.metrics {
                println!("{:<10} MAE {:.4}  RMSE {:.4}", m.model.name(), m.mae, m.rmse);
            }
            for path in &report.written {
                println!("wrote {}", path.display());
            }
        }
        Commands::Assemble {
            target,
            regressor,
            date_column,
            target_value_column,
            regressor_value_column,
            panel_columns,
            output,
        } => {
            let names: Vec<&str> = panel_columns.split(',').map(str::trim).collect();
            let columns = match names.as_slice() {
                [date, target_col, regressor_col] => {
                    ColumnMapping::new(date, target_col, regressor_col)
                }
                _ => anyhow::bail!(
                    "--panel-columns needs three comma-separated names, got '{}'",
                    panel_columns
                ),
            };

            let target_series =
                io::read_series_file(&target, &date_column, &target_value_column)?;
            let regressor_series =
                io::read_series_file(&regressor, &date_column, &regressor_value_column)?;
            let panel = io::assemble_panel(&target_series, &regressor_series)?;

            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            io::write_to_file(&output, |f| io::write_panel(&panel, &columns, f))?;

            println!("wrote {} ({} months)", output.display(), panel.len());
        }
    }

    Ok(())
}
