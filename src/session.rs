//! The query phase of a run: statistics for one selection, then exports.
//!
//! Only reached with a complete selection; a quit never gets here.

use crate::domain::{ColumnKey, Metric, LAST_YEAR};
use crate::merge::MergeOutput;
use crate::query::{self, MissingData};
use crate::render::{self, chart, export, report, text};
use crate::select::Selection;
use crate::utils::table_fingerprint;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub output_dir: PathBuf,
    pub charts: bool,
    pub export: bool,
    pub report_timestamp: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub missing_data: MissingData,
    pub written: Vec<PathBuf>,
}

pub fn run_session<W: Write>(
    merged: &mut MergeOutput,
    selection: &Selection,
    options: &SessionOptions,
    out: &mut W,
) -> Result<SessionOutcome> {
    let selector = selection.selector();
    let metric = selection.metric;

    let slice = query::slice(&merged.table, &selector);
    let missing_data = query::missing_data(&slice);
    writeln!(out, "\n{missing_data}\n")?;
    writeln!(out, "{}", text::banner("Sub-Region & Data Type You Chose"))?;
    writeln!(out, "{}", text::slice_table(&slice))?;

    writeln!(out, "{}", text::banner(&format!("Mean of All Data From 1995 to 2017 for {metric}")))?;
    writeln!(out, "{}", text::country_series("mean", &query::row_means(&slice)))?;

    query::attach_deltas(&mut merged.table)?;
    let heading = "Adding Columns To The Table for Differences From 1995 to 2017";
    writeln!(out, "{}", text::banner(heading))?;
    writeln!(out, "{}", text::merged_head(&merged.table, 5))?;
    writeln!(out, "Change Between 1995 and 2017")?;
    let deltas = query::delta_slice(&merged.table, &selector)?;
    writeln!(out, "{}", text::optional_country_series(metric.delta_label(), &deltas))?;

    let aggregates = query::region_aggregates(&merged.table);
    let cells_2017 = ColumnKey::year(Metric::CellPhones, LAST_YEAR);
    let means = aggregates.column_means(&cells_2017);
    let totals = aggregates.column_sums(&cells_2017);
    let heading = "Mean of Number of Cell Phones across all UN Sub-Regions in 2017";
    writeln!(out, "{}", text::banner(heading))?;
    let rows = means.iter().map(|&(r, v)| (r, Some(v)));
    writeln!(out, "{}", text::series("un sub-region", "mean", rows))?;
    let heading = "Total number of cell phones across all UN Sub-Regions in 2017";
    writeln!(out, "{}", text::banner(heading))?;
    let rows = totals.iter().map(|&(r, v)| (r, Some(v)));
    writeln!(out, "{}", text::series("un sub-region", "total", rows))?;
    let grand_total = aggregates.grand_total(&cells_2017);
    let heading = "Total number of cell phones in the world under UN Sub-Regions in 2017";
    writeln!(out, "{}", text::banner(heading))?;
    writeln!(out, "{}\n", text::format_value(Some(grand_total)))?;

    writeln!(out, "{}", text::banner("Described Data from Number of Cell Phones"))?;
    writeln!(out, "{}", text::describe_table(&query::describe(&aggregates, Metric::CellPhones)))?;

    let average =
        query::two_year_average(&merged.table, &selector, selection.year0, selection.year1)?;
    writeln!(out, "{}", text::banner("Average of your chosen sub-region, data type and years"))?;
    writeln!(
        out,
        "Average of {metric} in {} and {metric} in {}\n",
        selection.year0, selection.year1
    )?;
    writeln!(out, "{}", text::country_series("average", &average))?;

    writeln!(out, "{}", text::banner("Pivot Table"))?;
    writeln!(out, "{}", text::pivot_table(&merged.pivot))?;

    let mut written = Vec::new();
    if options.charts {
        let bar = chart::internet_bar_chart(&merged.table, &selection.sub_region)?;
        let pie = chart::cell_phone_pie_chart(&merged.table, &selection.sub_region)?;
        let charts = [(bar, chart::INTERNET_CHART_FILE), (pie, chart::CELL_PHONE_CHART_FILE)];
        for (spec, file) in charts {
            writeln!(out, "{}", text::banner(&format!("{} Data", spec.title)))?;
            let points = spec.points.iter().map(|p| (p.label.as_str(), p.value));
            writeln!(out, "{}", text::series("country", "2017", points))?;
            let path = options.output_dir.join(file);
            render::write_chart(&spec, &path)?;
            written.push(path);
        }
    }
    if options.export {
        let path = options.output_dir.join(export::MERGED_TABLE_FILE);
        render::write_merged_csv(&merged.table, &path)?;
        written.push(path);
    }

    let fingerprint = table_fingerprint(&merged.table);
    let summary = report::RunSummary {
        selection,
        missing_data,
        rows: merged.table.row_count(),
        columns: merged.table.column_count(),
        fingerprint: &fingerprint,
        grand_total_2017: grand_total,
    };
    let report_path = options.output_dir.join(report::REPORT_FILE);
    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect();
    render::write_report(&report_path, &summary, &names, options.report_timestamp)?;
    written.push(report_path);

    Ok(SessionOutcome { missing_data, written })
}
