//! Heart-rate and pace analysis for recorded runs: decode activity records,
//! derive elapsed time, pace and smoothed heart rate, account time in
//! heart-rate zones, and chart the result.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

pub use config::{AnalysisConfig, Config};
pub use error::AppError;
pub use pipeline::analyze::{analyze_bytes, analyze_records, Analysis};
