//! End-to-end tests of the library pipeline

mod common;

use common::{cells_csv, codes_csv, net_csv, year_row};
use country_tech::domain::{ColumnKey, Metric, Region, RowKey};
use country_tech::load::delimited::parse_delimited;
use country_tech::load::RawTable;
use country_tech::merge::{merge, MergeOutput};
use country_tech::normalize::{normalize_codes, normalize_metric};
use country_tech::pipeline::merge_raw;
use country_tech::query::{self, MissingData, Selector};
use country_tech::select::Selection;
use country_tech::session::{run_session, SessionOptions};
use country_tech::PipelineError;
use std::fs;
use tempfile::TempDir;

fn raw(name: &str, text: &str) -> RawTable {
    parse_delimited(name, text, b',').expect("parse")
}

fn merge_csv(cells: &str, net: &str) -> Result<MergeOutput, PipelineError> {
    merge_raw(&raw("cells.csv", cells), &raw("net.csv", net), &raw("codes.csv", &codes_csv()))
}

fn merged() -> MergeOutput {
    merge_csv(&cells_csv(), &net_csv()).expect("merge")
}

fn key(region: &str, country: &str) -> RowKey {
    RowKey::new(Region::Assigned(region.to_string()), country)
}

#[test]
fn merge_is_idempotent() {
    let first = merged();
    let second = merged();
    similar_asserts::assert_eq!(first.table, second.table);
    assert_eq!(first.pivot, second.pivot);
}

#[test]
fn merged_row_keys_are_unique_and_sorted() {
    let out = merged();
    let keys = out.table.row_keys();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(keys.len(), 5, "kenya appears once after case-folded de-duplication");
    assert_eq!(out.table.unassigned_countries(), vec!["netherlands"]);
    assert_eq!(out.table.column_count(), 46);
}

#[test]
fn shuffled_source_columns_land_under_the_right_labels() {
    // Years in descending order, with sparse and non-year columns interleaved.
    let years: Vec<u16> = (1990..=2019).rev().collect();
    let mut header = vec!["notes".to_string()];
    header.extend(years.iter().map(|y| y.to_string()));
    header.insert(5, "country".to_string());
    let row = |name: &str, f: fn(u16) -> f64| {
        let mut cells = vec!["x".to_string()];
        cells.extend(years.iter().map(|&y| f(y).to_string()));
        cells.insert(5, name.to_string());
        cells.join(",")
    };
    let cells = [header.join(","), row("Kenya", |y| f64::from(y) * 10.0)].join("\n");
    let net = [header.join(","), row("Kenya", |y| f64::from(y - 1990))].join("\n");

    let out = merge_csv(&cells, &net).expect("merge");
    let kenya = key("eastern africa", "kenya");
    for year in [1995u16, 2003, 2017] {
        let cells = ColumnKey::year(Metric::CellPhones, year);
        let net = ColumnKey::year(Metric::InternetUsers, year);
        assert_eq!(out.table.get(&kenya, &cells), Some(f64::from(year) * 10.0));
        assert_eq!(out.table.get(&kenya, &net), Some(f64::from(year - 1990)));
    }

    // Labels come from each table's own tag, not from argument order.
    let cells = normalize_metric(&raw("cells.csv", &cells), Metric::CellPhones).expect("cells");
    let net = normalize_metric(&raw("net.csv", &net), Metric::InternetUsers).expect("net");
    let codes = normalize_codes(&raw("codes.csv", &codes_csv())).expect("codes");
    let forward = merge(&cells, &net, &codes).expect("forward");
    let swapped = merge(&net, &cells, &codes).expect("swapped");
    similar_asserts::assert_eq!(forward.table, swapped.table);
    assert_eq!(forward.table, out.table);
}

#[test]
fn conflicting_duplicate_country_is_fatal() {
    let cells = [cells_csv(), year_row("Peru", 11.0, 20.0, 30.0, &[])].join("\n");
    let err = merge_csv(&cells, &net_csv()).unwrap_err();
    match err {
        PipelineError::DuplicateRowKey { key: collided } => {
            assert_eq!(collided, key("south america", "peru"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_country_column_is_fatal() {
    let err = merge_raw(
        &raw("cells.csv", "nation,1995\nKenya,1\n"),
        &raw("net.csv", &net_csv()),
        &raw("codes.csv", &codes_csv()),
    )
    .unwrap_err();
    assert!(err.to_string().contains("cells.csv"));
}

#[test]
fn region_queries_over_fixture() {
    let mut out = merged();
    let east = Selector::new("eastern africa", Metric::CellPhones);

    let slice = query::slice(&out.table, &east);
    assert_eq!(query::missing_data(&slice), MissingData::NoneFound);
    let south = query::slice(&out.table, &Selector::new("south america", Metric::CellPhones));
    assert_eq!(query::missing_data(&south), MissingData::Found);

    let peru_mean = query::row_means(&south)[0].value;
    assert!((peru_mean - (10.0 + 20.0 * 20.0 + 30.0) / 23.0).abs() < 1e-9);

    query::attach_deltas(&mut out.table).expect("deltas");
    let deltas = query::delta_slice(&out.table, &east).expect("delta");
    assert_eq!(deltas[0].value, Some(150.0));

    let aggregates = query::region_aggregates(&out.table);
    let cells_2017 = ColumnKey::year(Metric::CellPhones, 2017);
    assert_eq!(aggregates.sum("eastern africa", &cells_2017), Some(257.0));
    assert_eq!(aggregates.grand_total(&cells_2017), 287.0);
    assert_eq!(aggregates.regions, vec!["eastern africa", "melanesia", "south america"]);

    let average = query::two_year_average(&out.table, &east, 1995, 2017).expect("average");
    assert_eq!(average[0].value, 175.0);
}

#[test]
fn session_writes_all_outputs() {
    let tmp = TempDir::new().expect("tmp");
    let mut out = merged();
    let selection = Selection {
        sub_region: "eastern africa".to_string(),
        metric: Metric::CellPhones,
        year0: 1995,
        year1: 2017,
    };
    let options = SessionOptions {
        output_dir: tmp.path().to_path_buf(),
        charts: true,
        export: true,
        report_timestamp: false,
    };

    let mut text = Vec::new();
    let outcome = run_session(&mut out, &selection, &options, &mut text).expect("session");
    let text = String::from_utf8(text).expect("utf8");

    assert_eq!(outcome.missing_data, MissingData::NoneFound);
    assert_eq!(outcome.written.len(), 4);
    assert!(text.contains("No missing information found"));
    assert!(text.contains("Cell Phone Difference"));
    assert!(text.contains("287"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("report.json")).expect("report"))
            .expect("json");
    assert_eq!(report["grand_total_cells_2017"], serde_json::json!(287.0));
    assert_eq!(report["table"]["columns"], serde_json::json!(48));

    let export = fs::read_to_string(tmp.path().join("combined_data_frame.csv")).expect("export");
    let header = export.lines().nth(1).expect("header");
    assert!(header.ends_with("Cell Phone Difference,Internet Difference"));
}
