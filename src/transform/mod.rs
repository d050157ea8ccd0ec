//! Series transforms used to derive lagged features.

pub mod lag;

pub use lag::{difference, log_positive, shift};
