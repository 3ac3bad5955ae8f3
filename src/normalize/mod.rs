//! Per-table cleanup: case-folding, exact-duplicate removal, and pruning to
//! the canonical year range.

use crate::domain::{
    canonical_years, is_canonical_year, Metric, COUNTRY_COLUMN, REGION_COLUMN, SUB_REGION_COLUMN,
};
use crate::error::{PipelineError, Result};
use crate::load::{Cell, RawTable};
use std::collections::{BTreeMap, HashSet};

/// One country's values, aligned with [`MetricTable::years`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub country: String,
    pub values: Vec<Option<f64>>,
}

/// A metric table restricted to the canonical years.
///
/// Every canonical year is present, in ascending order; years the source
/// never had are all-absent columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub metric: Metric,
    pub years: Vec<u16>,
    pub rows: Vec<MetricRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeRow {
    pub country: String,
    pub sub_region: String,
}

/// Country to sub-region mapping (many-to-one).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeTable {
    pub rows: Vec<CodeRow>,
}

/// Exact, locale-independent case fold.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

pub fn normalize_metric(raw: &RawTable, metric: Metric) -> Result<MetricTable> {
    let country_col = require_column(raw, COUNTRY_COLUMN)?;

    let mut year_cols: BTreeMap<u16, usize> = BTreeMap::new();
    let mut dropped_years = 0usize;
    for (idx, header) in raw.headers.iter().enumerate() {
        if idx == country_col {
            continue;
        }
        match header.parse::<i64>() {
            Ok(year) if is_canonical_year(year) => {
                let year = year as u16;
                if year_cols.contains_key(&year) {
                    tracing::warn!("{}: repeated year column {year}; keeping the first", raw.name);
                } else {
                    year_cols.insert(year, idx);
                }
            }
            Ok(_) => dropped_years += 1,
            Err(_) => tracing::debug!("{}: ignoring non-year column '{header}'", raw.name),
        }
    }
    tracing::debug!(
        "{}: kept {} year columns, dropped {} outside {}..={}",
        raw.name,
        year_cols.len(),
        dropped_years,
        crate::domain::FIRST_YEAR,
        crate::domain::LAST_YEAR
    );

    let years: Vec<u16> = canonical_years().collect();
    let mut text_cells = 0usize;
    let mut seen: HashSet<(String, Vec<Option<u64>>)> = HashSet::new();
    let mut rows = Vec::with_capacity(raw.rows.len());

    for row in &raw.rows {
        let Some(country) = row[country_col].as_text() else {
            tracing::warn!("{}: skipping row with blank country", raw.name);
            continue;
        };
        let country = fold(&country);
        let values: Vec<Option<f64>> = years
            .iter()
            .map(|year| match year_cols.get(year).map(|&idx| &row[idx]) {
                Some(Cell::Number(n)) => Some(*n),
                Some(Cell::Text(_)) => {
                    text_cells += 1;
                    None
                }
                _ => None,
            })
            .collect();

        let identity = (country.clone(), values.iter().map(|v| v.map(f64::to_bits)).collect());
        if seen.insert(identity) {
            rows.push(MetricRow { country, values });
        }
    }

    if text_cells > 0 {
        tracing::warn!("{}: {text_cells} non-numeric year cells treated as missing", raw.name);
    }
    let duplicates = raw.rows.len() - rows.len();
    if duplicates > 0 {
        tracing::debug!("{}: removed {duplicates} duplicate or blank rows", raw.name);
    }

    Ok(MetricTable { metric, years, rows })
}

pub fn normalize_codes(raw: &RawTable) -> Result<CodeTable> {
    let country_col = require_column(raw, COUNTRY_COLUMN)?;
    let sub_region_col = require_column(raw, SUB_REGION_COLUMN)?;
    if raw.column(REGION_COLUMN).is_some() {
        tracing::debug!("{}: dropping '{REGION_COLUMN}' column", raw.name);
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let (Some(country), Some(sub_region)) =
            (row[country_col].as_text(), row[sub_region_col].as_text())
        else {
            tracing::warn!("{}: skipping row with blank country or sub-region", raw.name);
            continue;
        };
        let code = CodeRow { country: fold(&country), sub_region: fold(&sub_region) };
        if seen.insert(code.clone()) {
            rows.push(code);
        }
    }
    Ok(CodeTable { rows })
}

fn require_column(raw: &RawTable, column: &str) -> Result<usize> {
    raw.column(column).ok_or_else(|| PipelineError::MissingColumn {
        table: raw.name.clone(),
        column: column.to_string(),
    })
}
