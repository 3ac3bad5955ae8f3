//! Intermediate join frame.
//!
//! Every column carries its `(metric, year)` label from the moment it is
//! created, so joins and de-duplication can never shift values under the
//! wrong label.

use crate::domain::{cells_equal, ColumnKey};
use crate::error::{PipelineError, Result};
use crate::normalize::{CodeTable, MetricTable};
use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    pub country: String,
    pub sub_region: Option<String>,
    pub values: Vec<Option<f64>>,
}

impl FrameRow {
    fn identity(&self) -> (String, Option<String>, Vec<Option<u64>>) {
        (
            self.country.clone(),
            self.sub_region.clone(),
            self.values.iter().map(|v| v.map(f64::to_bits)).collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<FrameRow>,
}

impl Frame {
    pub fn from_metric(table: &MetricTable) -> Self {
        let columns = table.years.iter().map(|&year| ColumnKey::year(table.metric, year)).collect();
        let rows = table
            .rows
            .iter()
            .map(|row| FrameRow {
                country: row.country.clone(),
                sub_region: None,
                values: row.values.clone(),
            })
            .collect();
        Self { columns, rows }
    }

    pub fn from_codes(codes: &CodeTable) -> Self {
        let rows = codes
            .rows
            .iter()
            .map(|code| FrameRow {
                country: code.country.clone(),
                sub_region: Some(code.sub_region.clone()),
                values: Vec::new(),
            })
            .collect();
        Self { columns: Vec::new(), rows }
    }

    /// Full outer join on country, ordered by country.
    ///
    /// A country with several rows on both sides yields their cross product;
    /// a country on one side only gets absent cells for the other side.
    pub fn outer_join(left: Frame, right: Frame) -> Frame {
        let left_width = left.columns.len();
        let right_width = right.columns.len();
        let left_groups = group_by_country(&left.rows);
        let right_groups = group_by_country(&right.rows);
        let countries: BTreeSet<&str> =
            left_groups.keys().chain(right_groups.keys()).copied().collect();

        let mut rows = Vec::new();
        for country in countries {
            let lhs = left_groups.get(country).map(Vec::as_slice).unwrap_or_default();
            let rhs = right_groups.get(country).map(Vec::as_slice).unwrap_or_default();
            let join = |l: Option<&FrameRow>, r: Option<&FrameRow>| {
                combine(country, l, r, left_width, right_width)
            };
            match (lhs.is_empty(), rhs.is_empty()) {
                (false, false) => {
                    for &l in lhs {
                        for &r in rhs {
                            rows.push(join(Some(&left.rows[l]), Some(&right.rows[r])));
                        }
                    }
                }
                (false, true) => {
                    for &l in lhs {
                        rows.push(join(Some(&left.rows[l]), None));
                    }
                }
                (true, false) => {
                    for &r in rhs {
                        rows.push(join(None, Some(&right.rows[r])));
                    }
                }
                (true, true) => {}
            }
        }

        let mut columns = left.columns;
        columns.extend(right.columns);
        Frame { columns, rows }
    }

    /// Drop exact duplicate rows, keeping the first. Returns how many went.
    pub fn dedup_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::new();
        self.rows.retain(|row| seen.insert(row.identity()));
        before - self.rows.len()
    }

    /// Drop a column whose label and values both repeat an earlier column.
    ///
    /// Same label with different values cannot be resolved and is fatal.
    /// Columns with different labels are never merged.
    pub fn dedup_columns(&mut self) -> Result<usize> {
        let mut first_seen: BTreeMap<ColumnKey, usize> = BTreeMap::new();
        let mut drop = Vec::new();
        for (pos, key) in self.columns.iter().enumerate() {
            match first_seen.get(key) {
                None => {
                    first_seen.insert(*key, pos);
                }
                Some(&earlier) => {
                    let identical = self
                        .rows
                        .iter()
                        .all(|row| cells_equal(row.values[earlier], row.values[pos]));
                    if !identical {
                        return Err(PipelineError::DuplicateColumnKey { key: *key });
                    }
                    drop.push(pos);
                }
            }
        }

        if drop.is_empty() {
            return Ok(0);
        }
        let keep: Vec<bool> = (0..self.columns.len()).map(|pos| !drop.contains(&pos)).collect();
        self.columns = self
            .columns
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(key, _)| *key)
            .collect();
        for row in &mut self.rows {
            row.values =
                row.values.iter().zip(&keep).filter(|(_, k)| **k).map(|(v, _)| *v).collect();
        }
        Ok(drop.len())
    }
}

fn group_by_country(rows: &[FrameRow]) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, row) in rows.iter().enumerate() {
        groups.entry(row.country.as_str()).or_default().push(idx);
    }
    groups
}

fn combine(
    country: &str,
    left: Option<&FrameRow>,
    right: Option<&FrameRow>,
    left_width: usize,
    right_width: usize,
) -> FrameRow {
    let mut values = Vec::with_capacity(left_width + right_width);
    match left {
        Some(row) => values.extend_from_slice(&row.values),
        None => values.resize(left_width, None),
    }
    match right {
        Some(row) => values.extend_from_slice(&row.values),
        None => values.resize(left_width + right_width, None),
    }
    let sub_region = left
        .and_then(|r| r.sub_region.clone())
        .or_else(|| right.and_then(|r| r.sub_region.clone()));
    FrameRow { country: country.to_string(), sub_region, values }
}
