//! Pipeline module - the cleaning and feature engineering stages

pub mod aggregate;
pub mod binary;
pub mod columns;
pub mod dedup;
pub mod dummies;
pub mod loader;
pub mod repair;
pub mod stages;
pub mod tenure;
pub mod writer;

pub use aggregate::*;
pub use binary::*;
pub use columns::*;
pub use dedup::*;
pub use dummies::*;
pub use loader::*;
pub use repair::*;
pub use stages::*;
pub use tenure::*;
pub use writer::*;
