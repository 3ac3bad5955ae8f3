//! Typed errors for the load, normalize and merge stages.
//!
//! Every variant here is fatal: the pipeline stops and no merged table is
//! produced.

use crate::domain::{ColumnKey, RowKey};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("duplicate row key {key}: country has unresolved duplicate entries")]
    DuplicateRowKey { key: RowKey },

    #[error("duplicate column key {key} with conflicting values")]
    DuplicateColumnKey { key: ColumnKey },

    #[error("row {key} has {actual} values but the table has {expected} columns")]
    RowWidth { key: RowKey, expected: usize, actual: usize },

    #[error("column {key} has {actual} values but the table has {expected} rows")]
    ColumnLength { key: ColumnKey, expected: usize, actual: usize },

    #[error("table '{0}' has no header row")]
    EmptyTable(String),

    #[error("unsupported input format '.{extension}' for {path}")]
    UnsupportedFormat { extension: String, path: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
