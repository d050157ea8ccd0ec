//! Core data structures for the monthly panel.

mod panel;

pub use panel::{add_months, month_start, months_between, Panel, PanelRow};
