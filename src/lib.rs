//! churnlens: Telco customer churn pipeline
//!
//! Cleans the raw Telco customer export, engineers model-ready features
//! and produces churn aggregates, a text report and chart data.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::PipelineConfig;
pub use error::{ChurnError, DataIntegrityError, Result};
