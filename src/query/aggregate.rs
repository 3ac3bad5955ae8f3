//! Per-sub-region mean and sum of every column.

use crate::domain::{ColumnKey, MergedTable, Metric};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAggregates {
    pub regions: Vec<String>,
    pub columns: Vec<ColumnKey>,
    /// Countries per region.
    pub counts: Vec<usize>,
    means: Vec<Vec<f64>>,
    sums: Vec<Vec<f64>>,
}

/// Group rows by sub-region. Rows without a sub-region are not grouped.
///
/// Every column is aggregated, including attached delta columns. Absent
/// cells count as zero in both the sum and the mean.
pub fn region_aggregates(table: &MergedTable) -> RegionAggregates {
    let columns = table.columns().keys().to_vec();

    let mut aggregates = RegionAggregates {
        regions: Vec::new(),
        columns: columns.clone(),
        counts: Vec::new(),
        means: Vec::new(),
        sums: Vec::new(),
    };
    for region in table.sub_regions() {
        let mut sums = vec![0.0; columns.len()];
        let mut count = 0usize;
        for (_, values) in table.rows_in_region(region) {
            count += 1;
            for (sum, value) in sums.iter_mut().zip(values) {
                *sum += value.unwrap_or(0.0);
            }
        }
        let means = sums.iter().map(|s| s / count as f64).collect();
        aggregates.regions.push(region.to_string());
        aggregates.counts.push(count);
        aggregates.sums.push(sums);
        aggregates.means.push(means);
    }
    aggregates
}

impl RegionAggregates {
    fn locate(&self, region: &str, key: &ColumnKey) -> Option<(usize, usize)> {
        let row = self.regions.iter().position(|r| r == region)?;
        let col = self.columns.iter().position(|c| c == key)?;
        Some((row, col))
    }

    pub fn mean(&self, region: &str, key: &ColumnKey) -> Option<f64> {
        self.locate(region, key).map(|(r, c)| self.means[r][c])
    }

    pub fn sum(&self, region: &str, key: &ColumnKey) -> Option<f64> {
        self.locate(region, key).map(|(r, c)| self.sums[r][c])
    }

    /// Per-region means of one column.
    pub fn column_means(&self, key: &ColumnKey) -> Vec<(&str, f64)> {
        self.column_of(&self.means, key)
    }

    /// Per-region totals of one column.
    pub fn column_sums(&self, key: &ColumnKey) -> Vec<(&str, f64)> {
        self.column_of(&self.sums, key)
    }

    /// Sum of the per-region totals.
    pub fn grand_total(&self, key: &ColumnKey) -> f64 {
        self.column_sums(key).iter().map(|(_, v)| v).sum()
    }

    /// Columns of one metric, in table order, with their per-region means.
    pub fn metric_means(&self, metric: Metric) -> Vec<(ColumnKey, Vec<f64>)> {
        self.columns
            .iter()
            .filter(|key| key.metric == metric)
            .map(|key| (*key, self.column_means(key).into_iter().map(|(_, v)| v).collect()))
            .collect()
    }

    fn column_of(&self, matrix: &[Vec<f64>], key: &ColumnKey) -> Vec<(&str, f64)> {
        let Some(col) = self.columns.iter().position(|c| c == key) else {
            return Vec::new();
        };
        self.regions.iter().zip(matrix).map(|(r, row)| (r.as_str(), row[col])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnIndex, Region, RowKey};

    fn table() -> MergedTable {
        let mut columns = ColumnIndex::new();
        columns.push(ColumnKey::year(Metric::CellPhones, 2017)).expect("push");
        columns.push(ColumnKey::year(Metric::InternetUsers, 2017)).expect("push");
        let region = |name: &str| Region::Assigned(name.to_string());
        MergedTable::from_rows(
            columns,
            vec![
                (RowKey::new(region("a"), "x"), vec![Some(5.0), Some(10.0)]),
                (RowKey::new(region("a"), "y"), vec![Some(7.0), None]),
                (RowKey::new(region("b"), "z"), vec![None, Some(50.0)]),
                (RowKey::new(region("b"), "w"), vec![Some(4.0), Some(30.0)]),
                (RowKey::new(Region::Unassigned, "q"), vec![Some(1000.0), None]),
            ],
        )
        .expect("table")
    }

    #[test]
    fn region_sum_and_grand_total() {
        let agg = region_aggregates(&table());
        let key = ColumnKey::year(Metric::CellPhones, 2017);
        assert_eq!(agg.regions, vec!["a", "b"]);
        assert_eq!(agg.sum("a", &key), Some(12.0));
        assert_eq!(agg.sum("b", &key), Some(4.0));
        assert_eq!(agg.grand_total(&key), 16.0, "unassigned rows are not grouped");
    }

    #[test]
    fn region_mean_counts_absent_as_zero() {
        let agg = region_aggregates(&table());
        assert_eq!(agg.mean("b", &ColumnKey::year(Metric::CellPhones, 2017)), Some(2.0));
        assert_eq!(agg.mean("a", &ColumnKey::year(Metric::InternetUsers, 2017)), Some(5.0));
        assert_eq!(agg.counts, vec![2, 2]);
    }

    #[test]
    fn metric_means_lists_columns_of_one_metric() {
        let agg = region_aggregates(&table());
        let means = agg.metric_means(Metric::CellPhones);
        assert_eq!(means, vec![(ColumnKey::year(Metric::CellPhones, 2017), vec![6.0, 2.0])]);
    }

    #[test]
    fn attached_delta_columns_are_aggregated() {
        let mut table = table();
        let delta = ColumnKey::delta(Metric::CellPhones);
        table
            .append_column(delta, vec![Some(1.0), Some(3.0), None, Some(8.0), Some(100.0)])
            .expect("append");
        let agg = region_aggregates(&table);
        assert_eq!(agg.sum("a", &delta), Some(4.0));
        assert_eq!(agg.mean("b", &delta), Some(4.0));
        let keys: Vec<ColumnKey> =
            agg.metric_means(Metric::CellPhones).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![ColumnKey::year(Metric::CellPhones, 2017), delta]);
    }
}
