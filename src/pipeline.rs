//! Load, normalize and merge the three input tables.

use crate::domain::Metric;
use crate::error::PipelineError;
use crate::load::{load_table, RawTable};
use crate::merge::{merge, MergeOutput};
use crate::normalize::{normalize_codes, normalize_metric};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct InputPaths {
    pub cell_phones: PathBuf,
    pub internet_users: PathBuf,
    pub codes: PathBuf,
}

pub fn load_and_merge(paths: &InputPaths) -> Result<MergeOutput> {
    let cells = load_table(&paths.cell_phones)?;
    let net = load_table(&paths.internet_users)?;
    let codes = load_table(&paths.codes)?;
    Ok(merge_raw(&cells, &net, &codes)?)
}

/// Normalize and merge already-loaded tables.
pub fn merge_raw(
    cells: &RawTable,
    net: &RawTable,
    codes: &RawTable,
) -> std::result::Result<MergeOutput, PipelineError> {
    let cells = normalize_metric(cells, Metric::CellPhones)?;
    let net = normalize_metric(net, Metric::InternetUsers)?;
    let codes = normalize_codes(codes)?;
    tracing::debug!(
        "Normalized: {} cell-phone rows, {} internet rows, {} code rows",
        cells.rows.len(),
        net.rows.len(),
        codes.rows.len()
    );
    merge(&cells, &net, &codes)
}
