//! Query engine: read-only slices and statistics over a [`MergedTable`].
//!
//! Selectors reaching this module are already validated. Absent cells count
//! as zero in every aggregate; [`missing_data`] reports when that happened.

use crate::domain::{ColumnKey, CountryValue, MergedTable, Metric, FIRST_YEAR, LAST_YEAR};
use crate::error::PipelineError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub mod aggregate;
pub mod describe;

pub use aggregate::{region_aggregates, RegionAggregates};
pub use describe::{describe, ColumnSummary, Summary};

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("delta columns have not been attached to this table")]
    DeltasNotAttached,

    #[error("column {0} is not part of the merged table")]
    UnknownColumn(ColumnKey),

    #[error(transparent)]
    Table(#[from] PipelineError),
}

/// A `(sub-region, metric)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    pub sub_region: String,
    pub metric: Metric,
}

impl Selector {
    pub fn new(sub_region: impl Into<String>, metric: Metric) -> Self {
        Self { sub_region: sub_region.into(), metric }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceRow {
    pub country: String,
    pub values: Vec<Option<f64>>,
}

/// Rows of one sub-region, year columns of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub selector: Selector,
    pub years: Vec<u16>,
    pub rows: Vec<SliceRow>,
}

impl Slice {
    pub fn cells(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().flat_map(|row| row.values.iter().copied())
    }
}

/// Outcome of the advisory missing-data check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingData {
    Found,
    NoneFound,
}

impl fmt::Display for MissingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingData::Found => f.write_str(
                "There are values missing within the data, calculations were performed \
                 on the data assuming a zero value was present",
            ),
            MissingData::NoneFound => f.write_str("No missing information found"),
        }
    }
}

pub fn slice(table: &MergedTable, selector: &Selector) -> Slice {
    let columns: Vec<(usize, u16)> = table.columns().years_of(selector.metric).collect();
    let rows = table
        .rows_in_region(&selector.sub_region)
        .map(|(key, values)| SliceRow {
            country: key.country.clone(),
            values: columns.iter().map(|&(pos, _)| values[pos]).collect(),
        })
        .collect();
    Slice { selector: selector.clone(), years: columns.iter().map(|&(_, y)| y).collect(), rows }
}

pub fn missing_data(slice: &Slice) -> MissingData {
    if slice.cells().any(|cell| cell.is_none()) {
        MissingData::Found
    } else {
        MissingData::NoneFound
    }
}

/// Mean across all years per country, absent cells counted as zero.
pub fn row_means(slice: &Slice) -> Vec<CountryValue> {
    let years = slice.years.len() as f64;
    slice
        .rows
        .iter()
        .map(|row| CountryValue {
            country: row.country.clone(),
            value: row.values.iter().map(|v| v.unwrap_or(0.0)).sum::<f64>() / years,
        })
        .collect()
}

/// Append the 1995 to 2017 delta column for each metric.
///
/// Returns `false` without touching the table if the deltas already exist.
/// A delta is absent when either endpoint is absent.
pub fn attach_deltas(table: &mut MergedTable) -> Result<bool, QueryError> {
    if Metric::ALL.iter().all(|&m| table.columns().contains(&ColumnKey::delta(m))) {
        return Ok(false);
    }
    for metric in Metric::ALL {
        let first = column(table, ColumnKey::year(metric, FIRST_YEAR))?;
        let last = column(table, ColumnKey::year(metric, LAST_YEAR))?;
        let deltas: Vec<Option<f64>> = table
            .rows()
            .map(|(_, values)| match (values[first], values[last]) {
                (Some(start), Some(end)) => Some(end - start),
                _ => None,
            })
            .collect();
        table.append_column(ColumnKey::delta(metric), deltas)?;
    }
    tracing::debug!("Attached delta columns");
    Ok(true)
}

/// The selected metric's delta column, restricted to the selected sub-region.
pub fn delta_slice(
    table: &MergedTable,
    selector: &Selector,
) -> Result<Vec<CountryValue<Option<f64>>>, QueryError> {
    let pos = table
        .columns()
        .position(&ColumnKey::delta(selector.metric))
        .ok_or(QueryError::DeltasNotAttached)?;
    Ok(table
        .rows_in_region(&selector.sub_region)
        .map(|(key, values)| CountryValue { country: key.country.clone(), value: values[pos] })
        .collect())
}

/// `(value(year0) + value(year1)) / 2` per country, absent cells counted as zero.
pub fn two_year_average(
    table: &MergedTable,
    selector: &Selector,
    year0: u16,
    year1: u16,
) -> Result<Vec<CountryValue>, QueryError> {
    let first = column(table, ColumnKey::year(selector.metric, year0))?;
    let second = column(table, ColumnKey::year(selector.metric, year1))?;
    Ok(table
        .rows_in_region(&selector.sub_region)
        .map(|(key, values)| CountryValue {
            country: key.country.clone(),
            value: (values[first].unwrap_or(0.0) + values[second].unwrap_or(0.0)) / 2.0,
        })
        .collect())
}

/// Values of one column for a sub-region, absent cells kept.
pub fn region_column(
    table: &MergedTable,
    sub_region: &str,
    key: ColumnKey,
) -> Result<Vec<CountryValue<Option<f64>>>, QueryError> {
    let pos = column(table, key)?;
    Ok(table
        .rows_in_region(sub_region)
        .map(|(row, values)| CountryValue { country: row.country.clone(), value: values[pos] })
        .collect())
}

fn column(table: &MergedTable, key: ColumnKey) -> Result<usize, QueryError> {
    table.columns().position(&key).ok_or(QueryError::UnknownColumn(key))
}
