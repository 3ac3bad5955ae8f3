//! Merge engine: joins the normalized tables into one [`MergedTable`] keyed
//! by `(sub-region, country)` rows and `(metric, year)` columns.

use crate::domain::{canonical_years, ColumnIndex, ColumnKey, MergedTable, Metric, Region, RowKey};
use crate::error::Result;
use crate::normalize::{CodeTable, MetricTable};
use std::collections::HashMap;

pub mod join;
pub mod pivot;

use join::Frame;
pub use pivot::{build_pivot, PivotRowKey, PivotView};

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutput {
    pub table: MergedTable,
    pub pivot: PivotView,
}

/// Merge the two metric tables and the code table.
///
/// Each metric table's columns are labelled from its own `metric` tag, so
/// argument order does not affect which values land under which label. Any
/// duplicate composite key aborts the merge; no partial table is returned.
pub fn merge(cells: &MetricTable, net: &MetricTable, codes: &CodeTable) -> Result<MergeOutput> {
    let mut frame = Frame::outer_join(Frame::from_metric(cells), Frame::from_metric(net));
    dedup(&mut frame, "metric join")?;

    let mut frame = Frame::outer_join(Frame::from_codes(codes), frame);
    dedup(&mut frame, "code join")?;

    let columns = canonical_columns(&frame)?;
    let positions: HashMap<ColumnKey, usize> =
        frame.columns.iter().enumerate().map(|(pos, key)| (*key, pos)).collect();
    let source: Vec<Option<usize>> =
        columns.keys().iter().map(|key| positions.get(key).copied()).collect();

    let rows = frame.rows.into_iter().map(|row| {
        let key = RowKey::new(
            row.sub_region.map(Region::Assigned).unwrap_or(Region::Unassigned),
            row.country,
        );
        let values = source.iter().map(|pos| pos.and_then(|p| row.values[p])).collect();
        (key, values)
    });
    let table = MergedTable::from_rows(columns, rows)?;

    let unassigned = table.unassigned_countries().len();
    if unassigned > 0 {
        tracing::info!(
            "{unassigned} countries have no sub-region and are left out of region statistics"
        );
    }
    tracing::info!(
        "Merged table: {} rows x {} columns across {} sub-regions",
        table.row_count(),
        table.column_count(),
        table.sub_regions().len()
    );

    let pivot = build_pivot(&table);
    Ok(MergeOutput { table, pivot })
}

fn dedup(frame: &mut Frame, stage: &str) -> Result<()> {
    let rows = frame.dedup_rows();
    let columns = frame.dedup_columns()?;
    if rows > 0 || columns > 0 {
        tracing::debug!("{stage}: removed {rows} duplicate rows and {columns} duplicate columns");
    }
    Ok(())
}

/// All years of the first metric, then all years of the second.
fn canonical_columns(frame: &Frame) -> Result<ColumnIndex> {
    let mut columns = ColumnIndex::new();
    for metric in Metric::ALL {
        for year in canonical_years() {
            let key = ColumnKey::year(metric, year);
            if !frame.columns.contains(&key) {
                tracing::warn!("No source column for {key}; treating it as missing data");
            }
            columns.push(key)?;
        }
    }
    Ok(columns)
}
