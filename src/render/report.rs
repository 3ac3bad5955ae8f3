//! Run report JSON generation.

use crate::query::MissingData;
use crate::select::Selection;
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

pub const REPORT_FILE: &str = "report.json";
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    pub selection: &'a Selection,
    pub missing_data: MissingData,
    pub rows: usize,
    pub columns: usize,
    pub fingerprint: &'a str,
    pub grand_total_2017: f64,
}

pub fn write_report(
    report_path: &Path,
    summary: &RunSummary<'_>,
    output_files: &[String],
    include_timestamp: bool,
) -> Result<()> {
    let mut sorted_output_files = output_files.to_vec();
    sorted_output_files.sort();

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("selection".to_string(), serde_json::to_value(summary.selection)?);
    report.insert("missing_data".to_string(), serde_json::to_value(summary.missing_data)?);
    report.insert(
        "table".to_string(),
        json!({
            "rows": summary.rows,
            "columns": summary.columns,
            "fingerprint": summary.fingerprint,
        }),
    );
    report.insert("grand_total_cells_2017".to_string(), json!(summary.grand_total_2017));
    report.insert("output_files".to_string(), serde_json::to_value(sorted_output_files)?);

    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(report))?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Metric;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn report_omits_timestamp_when_disabled() {
        let tmp = TempDir::new().expect("tmp");
        let report_path = tmp.path().join(REPORT_FILE);
        let selection = Selection {
            sub_region: "melanesia".to_string(),
            metric: Metric::InternetUsers,
            year0: 2000,
            year1: 2010,
        };
        let summary = RunSummary {
            selection: &selection,
            missing_data: MissingData::Found,
            rows: 3,
            columns: 48,
            fingerprint: "abc",
            grand_total_2017: 12.0,
        };

        write_report(&report_path, &summary, &["b.json".to_string(), "a.csv".to_string()], false)
            .expect("write report");

        let content = fs::read_to_string(report_path).expect("read report");
        let parsed: serde_json::Value = serde_json::from_str(&content).expect("json");
        assert!(parsed.get("generated_at").is_none());
        assert_eq!(parsed["selection"]["metric"], json!("internet_users"));
        assert_eq!(parsed["missing_data"], json!("found"));
        assert_eq!(parsed["output_files"], json!(["a.csv", "b.json"]));
        assert_eq!(parsed["table"]["columns"], json!(48));
    }
}
