//! Plain-text tables for terminal output.

use crate::domain::{CountryValue, MergedTable};
use crate::merge::PivotView;
use crate::query::{ColumnSummary, Slice};
use console::style;
use unicode_width::UnicodeWidthStr;

/// Section banner, e.g. `***** Pivot Table *****`.
pub fn banner(title: &str) -> String {
    style(format!("{0} {title} {0}", "*".repeat(20))).bold().to_string()
}

/// Absent cells print as `NaN`; whole numbers print without decimals.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => "NaN".to_string(),
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => {
            let text = format!("{v:.6}");
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Align a grid. The first `label_columns` columns are left-aligned, the
/// rest right-aligned.
pub fn grid(header_rows: &[Vec<String>], rows: &[Vec<String>], label_columns: usize) -> String {
    let all: Vec<&Vec<String>> = header_rows.iter().chain(rows).collect();
    let ncols = all.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; ncols];
    for row in &all {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut out = String::new();
    for row in all {
        let mut line = String::new();
        for (idx, (cell, width)) in row.iter().zip(&widths).enumerate() {
            let pad = width - UnicodeWidthStr::width(cell.as_str());
            if idx > 0 {
                line.push_str("  ");
            }
            if idx < label_columns {
                line.push_str(cell);
                line.push_str(&" ".repeat(pad));
            } else {
                line.push_str(&" ".repeat(pad));
                line.push_str(cell);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// First `n` rows of the merged table with its two-level column header.
pub fn merged_head(table: &MergedTable, n: usize) -> String {
    let keys = table.columns().keys();
    let mut metric_row = vec!["".to_string(), "data".to_string()];
    let mut field_row = vec!["un sub-region".to_string(), "country".to_string()];
    let mut previous = None;
    for key in keys {
        let label =
            if previous == Some(key.metric) { String::new() } else { key.metric.to_string() };
        metric_row.push(label);
        previous = Some(key.metric);
        field_row.push(key.field_label());
    }

    let rows: Vec<Vec<String>> = table
        .rows()
        .take(n)
        .map(|(key, values)| {
            let mut row = vec![key.sub_region.to_string(), key.country.clone()];
            row.extend(values.iter().map(|v| format_value(*v)));
            row
        })
        .collect();
    format!(
        "{}\n[{} rows x {} columns]\n",
        grid(&[metric_row, field_row], &rows, 2),
        table.row_count(),
        table.column_count()
    )
}

pub fn slice_table(slice: &Slice) -> String {
    let mut header = vec!["country".to_string()];
    header.extend(slice.years.iter().map(u16::to_string));
    let rows: Vec<Vec<String>> = slice
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.country.clone()];
            cells.extend(row.values.iter().map(|v| format_value(*v)));
            cells
        })
        .collect();
    grid(&[header], &rows, 1)
}

/// One labelled value per line.
pub fn series<'a, I>(label_header: &str, value_header: &str, items: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let rows: Vec<Vec<String>> = items
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), format_value(value)])
        .collect();
    grid(&[vec![label_header.to_string(), value_header.to_string()]], &rows, 1)
}

pub fn country_series(value_header: &str, values: &[CountryValue]) -> String {
    series("country", value_header, values.iter().map(|cv| (cv.country.as_str(), Some(cv.value))))
}

pub fn optional_country_series(value_header: &str, values: &[CountryValue<Option<f64>>]) -> String {
    series("country", value_header, values.iter().map(|cv| (cv.country.as_str(), cv.value)))
}

/// Statistics as rows, years as columns.
pub fn describe_table(summaries: &[ColumnSummary]) -> String {
    let mut header = vec!["".to_string()];
    header.extend(summaries.iter().map(|s| s.key.field_label()));
    let stat = |name: &str, pick: fn(&ColumnSummary) -> f64| {
        let mut row = vec![name.to_string()];
        row.extend(summaries.iter().map(|s| format_value(Some(pick(s)))));
        row
    };
    let rows = vec![
        stat("count", |s| s.summary.count as f64),
        stat("mean", |s| s.summary.mean),
        stat("std", |s| s.summary.std),
        stat("min", |s| s.summary.min),
        stat("25%", |s| s.summary.q25),
        stat("50%", |s| s.summary.median),
        stat("75%", |s| s.summary.q75),
        stat("max", |s| s.summary.max),
    ];
    grid(&[header], &rows, 1)
}

/// The pivot transposed: `(year, sub-region)` rows, `(country, 2017 count)` columns.
pub fn pivot_table(pivot: &PivotView) -> String {
    if pivot.is_empty() {
        return "(empty pivot)\n".to_string();
    }
    let mut country_row = vec!["".to_string(), "country".to_string()];
    country_row.extend(pivot.rows.iter().map(|k| k.country.clone()));
    let mut count_row = vec!["".to_string(), "2017".to_string()];
    count_row.extend(pivot.rows.iter().map(|k| format_value(Some(k.count_2017))));

    let rows: Vec<Vec<String>> = pivot
        .columns
        .iter()
        .enumerate()
        .map(|(col, (year, region))| {
            let mut row = vec![year.to_string(), region.clone()];
            row.extend((0..pivot.rows.len()).map(|r| format_value(Some(pivot.value(r, col)))));
            row
        })
        .collect();
    grid(&[country_row, count_row], &rows, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_format_like_a_table() {
        assert_eq!(format_value(None), "NaN");
        assert_eq!(format_value(Some(12.0)), "12");
        assert_eq!(format_value(Some(13.333333333)), "13.333333");
        assert_eq!(format_value(Some(2.5)), "2.5");
    }

    #[test]
    fn grid_aligns_wide_characters() {
        let out = grid(
            &[vec!["country".into(), "value".into()]],
            &[vec!["côte d'ivoire".into(), "1".into()], vec!["chad".into(), "100".into()]],
            1,
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "côte d'ivoire      1");
        assert_eq!(lines[2], "chad             100");
    }
}
