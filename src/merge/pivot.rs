//! Country-by-sub-region pivot of the cell-phone counts.

use crate::domain::{MergedTable, Metric, LAST_YEAR};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Pivot row key: a country and its 2017 cell-phone count.
#[derive(Debug, Clone)]
pub struct PivotRowKey {
    pub country: String,
    pub count_2017: f64,
}

impl PartialEq for PivotRowKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PivotRowKey {}

impl PartialOrd for PivotRowKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PivotRowKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.country.cmp(&other.country).then_with(|| self.count_2017.total_cmp(&other.count_2017))
    }
}

/// Rows `(country, 2017 count)`, columns `(year, sub-region)`, summed values
/// with every absent combination filled with zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotView {
    pub rows: Vec<PivotRowKey>,
    pub columns: Vec<(u16, String)>,
    values: Vec<Vec<f64>>,
}

impl PivotView {
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.values[row][column]
    }

    pub fn get(&self, country: &str, year: u16, sub_region: &str) -> Option<f64> {
        let row = self.rows.iter().position(|k| k.country == country)?;
        let col = self.columns.iter().position(|(y, r)| *y == year && r == sub_region)?;
        Some(self.values[row][col])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the pivot from the cell-phone columns of a merged table.
///
/// Rows without a sub-region or without a 2017 count have no pivot key and
/// are left out.
pub fn build_pivot(table: &MergedTable) -> PivotView {
    let columns = table.columns();
    let Some((pos_2017, _)) = columns.years_of(Metric::CellPhones).find(|(_, y)| *y == LAST_YEAR)
    else {
        return PivotView::default();
    };
    let value_years: Vec<(usize, u16)> =
        columns.years_of(Metric::CellPhones).filter(|(_, y)| *y != LAST_YEAR).collect();

    let mut sums: BTreeMap<PivotRowKey, BTreeMap<(u16, String), f64>> = BTreeMap::new();
    let mut regions: BTreeSet<String> = BTreeSet::new();
    for (key, values) in table.rows() {
        let (Some(region), Some(count)) = (key.sub_region.name(), values[pos_2017]) else {
            continue;
        };
        regions.insert(region.to_string());
        let cells = sums
            .entry(PivotRowKey { country: key.country.clone(), count_2017: count })
            .or_default();
        for &(pos, year) in &value_years {
            *cells.entry((year, region.to_string())).or_insert(0.0) += values[pos].unwrap_or(0.0);
        }
    }

    let pivot_columns: Vec<(u16, String)> = value_years
        .iter()
        .flat_map(|&(_, year)| regions.iter().map(move |r| (year, r.clone())))
        .collect();
    let mut view = PivotView { rows: Vec::new(), columns: pivot_columns, values: Vec::new() };
    for (row_key, cells) in sums {
        let row = view.columns.iter().map(|col| cells.get(col).copied().unwrap_or(0.0)).collect();
        view.rows.push(row_key);
        view.values.push(row);
    }
    tracing::debug!("Pivot view: {} rows, {} columns", view.rows.len(), view.columns.len());
    view
}
