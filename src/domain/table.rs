//! The merged multi-key table.

use super::{ColumnKey, Field, Metric, Region, RowKey};
use crate::error::{PipelineError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Ordered set of column keys with O(1) key-to-position lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnIndex {
    keys: Vec<ColumnKey>,
    positions: HashMap<ColumnKey, usize>,
}

impl ColumnIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key, rejecting one that is already present.
    pub fn push(&mut self, key: ColumnKey) -> Result<usize> {
        if self.positions.contains_key(&key) {
            return Err(PipelineError::DuplicateColumnKey { key });
        }
        let position = self.keys.len();
        self.keys.push(key);
        self.positions.insert(key, position);
        Ok(position)
    }

    pub fn position(&self, key: &ColumnKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains(&self, key: &ColumnKey) -> bool {
        self.positions.contains_key(key)
    }

    pub fn keys(&self) -> &[ColumnKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Year columns of one metric, in physical order.
    pub fn years_of(&self, metric: Metric) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.keys.iter().enumerate().filter_map(move |(pos, key)| match key.field {
            Field::Year(year) if key.metric == metric => Some((pos, year)),
            _ => None,
        })
    }
}

/// Rows keyed by `(sub-region, country)`, columns keyed by `(metric, year)`.
///
/// Rows are stored sorted by key. Construction rejects duplicate row keys, so
/// no row is ever silently overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    rows: Vec<RowKey>,
    row_index: BTreeMap<RowKey, usize>,
    columns: ColumnIndex,
    data: Vec<Vec<Option<f64>>>,
}

impl MergedTable {
    /// Build a table from keyed rows. Each row must have one value per column.
    pub fn from_rows(
        columns: ColumnIndex,
        rows: impl IntoIterator<Item = (RowKey, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let mut keyed: BTreeMap<RowKey, Vec<Option<f64>>> = BTreeMap::new();
        for (key, values) in rows {
            if values.len() != columns.len() {
                return Err(PipelineError::RowWidth {
                    key,
                    expected: columns.len(),
                    actual: values.len(),
                });
            }
            if keyed.contains_key(&key) {
                return Err(PipelineError::DuplicateRowKey { key });
            }
            keyed.insert(key, values);
        }

        let mut table = Self {
            rows: Vec::with_capacity(keyed.len()),
            row_index: BTreeMap::new(),
            columns,
            data: Vec::with_capacity(keyed.len()),
        };
        for (position, (key, values)) in keyed.into_iter().enumerate() {
            table.row_index.insert(key.clone(), position);
            table.rows.push(key);
            table.data.push(values);
        }
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &ColumnIndex {
        &self.columns
    }

    pub fn row_keys(&self) -> &[RowKey] {
        &self.rows
    }

    pub fn row(&self, key: &RowKey) -> Option<&[Option<f64>]> {
        self.row_index.get(key).map(|&pos| self.data[pos].as_slice())
    }

    /// Cell lookup by composite row and column key.
    pub fn get(&self, row: &RowKey, column: &ColumnKey) -> Option<f64> {
        let col = self.columns.position(column)?;
        self.row(row).and_then(|values| values[col])
    }

    pub fn rows(&self) -> impl Iterator<Item = (&RowKey, &[Option<f64>])> {
        self.rows.iter().zip(self.data.iter().map(Vec::as_slice))
    }

    /// All rows of one named sub-region, in country order.
    pub fn rows_in_region<'a>(
        &'a self,
        sub_region: &'a str,
    ) -> impl Iterator<Item = (&'a RowKey, &'a [Option<f64>])> + 'a {
        let start = RowKey::new(Region::Assigned(sub_region.to_string()), String::new());
        self.row_index
            .range(start..)
            .take_while(move |(key, _)| key.sub_region.name() == Some(sub_region))
            .map(move |(key, &pos)| (key, self.data[pos].as_slice()))
    }

    /// Distinct named sub-regions, sorted.
    pub fn sub_regions(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self.rows.iter().filter_map(|k| k.sub_region.name()).collect();
        names.into_iter().collect()
    }

    pub fn unassigned_countries(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|k| k.sub_region == Region::Unassigned)
            .map(|k| k.country.as_str())
            .collect()
    }

    /// Count absent cells in the year columns of a metric.
    pub fn missing_cells(&self, metric: Metric) -> usize {
        let positions: Vec<usize> = self.columns.years_of(metric).map(|(pos, _)| pos).collect();
        self.data
            .iter()
            .map(|row| positions.iter().filter(|&&pos| row[pos].is_none()).count())
            .sum()
    }

    /// Append a column. Fails if the key exists or the length is wrong.
    pub(crate) fn append_column(&mut self, key: ColumnKey, values: Vec<Option<f64>>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(PipelineError::ColumnLength {
                key,
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(key)?;
        for (row, value) in self.data.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }
}
