//! Numerical utilities shared by the models and the summarizer.

pub mod metrics;
pub mod ols;

pub use metrics::{summarize, ErrorSummary};
pub use ols::{ols_fit, OLSResult};
