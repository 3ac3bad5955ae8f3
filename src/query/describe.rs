//! Count / mean / std / quartile summary over region means.

use super::RegionAggregates;
use crate::domain::{ColumnKey, Metric};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub key: ColumnKey,
    pub summary: Summary,
}

/// Summarize the per-region means of each column of `metric`, the delta
/// column included once attached.
pub fn describe(aggregates: &RegionAggregates, metric: Metric) -> Vec<ColumnSummary> {
    aggregates
        .metric_means(metric)
        .into_iter()
        .map(|(key, values)| ColumnSummary { key, summary: summarize(&values) })
        .collect()
}

pub fn summarize(values: &[f64]) -> Summary {
    let count = values.len();
    if count == 0 {
        return Summary {
            count,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        f64::NAN
    } else {
        let variance =
            sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    };

    Summary {
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear interpolation between the closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_linear_quartiles() {
        let s = summarize(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q25, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q75, 3.25);
        assert_eq!(s.max, 4.0);
        assert!((s.std - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_undefined_std() {
        let s = summarize(&[7.0]);
        assert_eq!(s.median, 7.0);
        assert!(s.std.is_nan());
    }

    #[test]
    fn describe_covers_attached_delta_column() {
        use crate::domain::{ColumnIndex, MergedTable, Region, RowKey};
        use crate::query::{attach_deltas, region_aggregates};

        let row = |region: &str, country: &str| {
            RowKey::new(Region::Assigned(region.to_string()), country)
        };
        let mut columns = ColumnIndex::new();
        columns.push(ColumnKey::year(Metric::CellPhones, 1995)).expect("push");
        columns.push(ColumnKey::year(Metric::CellPhones, 2017)).expect("push");
        columns.push(ColumnKey::year(Metric::InternetUsers, 1995)).expect("push");
        columns.push(ColumnKey::year(Metric::InternetUsers, 2017)).expect("push");
        let mut table = MergedTable::from_rows(
            columns,
            vec![
                (row("a", "x"), vec![Some(1.0), Some(5.0), None, None]),
                (row("b", "y"), vec![Some(2.0), Some(10.0), None, None]),
            ],
        )
        .expect("table");
        attach_deltas(&mut table).expect("attach");

        let summaries = describe(&region_aggregates(&table), Metric::CellPhones);
        let keys: Vec<ColumnKey> = summaries.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                ColumnKey::year(Metric::CellPhones, 1995),
                ColumnKey::year(Metric::CellPhones, 2017),
                ColumnKey::delta(Metric::CellPhones),
            ]
        );
        assert_eq!(summaries[2].summary.mean, 6.0);
        assert_eq!(summaries[2].summary.count, 2);
    }

    #[test]
    fn empty_summary() {
        let s = summarize(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
    }
}
