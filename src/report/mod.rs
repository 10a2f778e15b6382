//! Report module - text report, chart data and the run summary

pub mod charts;
pub mod churn_report;
pub mod summary;

pub use charts::*;
pub use churn_report::*;
pub use summary::*;
