//! country-tech: merge UN country tech datasets into one multi-key table
//!
//! Three tables (cell phones per country, internet users per country, and a
//! country to UN sub-region code table) are normalized and merged into a
//! [`domain::MergedTable`] keyed by `(sub-region, country)` rows and
//! `(metric, year)` columns. The query engine then computes slices, region
//! aggregates, deltas and averages for an operator's selection.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod load;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod render;
pub mod select;
pub mod session;
pub mod utils;

pub use error::PipelineError;
