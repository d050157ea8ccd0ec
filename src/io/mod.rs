//! Delimited-table input and output.

pub mod panel_csv;
pub mod results;
pub mod series;

pub use panel_csv::{parse_month, read_panel, read_panel_file};
pub use results::{
    prediction_header, write_metrics, write_period_metrics, write_predictions, write_to_file,
};
pub use series::{assemble_panel, read_series, read_series_file, write_panel, SeriesPoint};
