//! Chart specifications for the selected sub-region.
//!
//! Rendering is left to whatever consumes the JSON; this module only decides
//! what is plotted.

use crate::domain::{ColumnKey, MergedTable, Metric, LAST_YEAR};
use crate::query::{region_column, QueryError};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

pub const INTERNET_CHART_FILE: &str = "internet_users_by_country.json";
pub const CELL_PHONE_CHART_FILE: &str = "cell_phones_by_country.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub points: Vec<ChartPoint>,
}

/// Bar chart of 2017 internet usage per country. Absent values stay `null`.
pub fn internet_bar_chart(
    table: &MergedTable,
    sub_region: &str,
) -> Result<ChartSpec, QueryError> {
    let key = ColumnKey::year(Metric::InternetUsers, LAST_YEAR);
    let values = region_column(table, sub_region, key)?;
    Ok(ChartSpec {
        kind: ChartKind::Bar,
        title: "Internet Users Per UN Sub-Region (%)".to_string(),
        x_label: Some("Countries".to_string()),
        y_label: Some("% of Users".to_string()),
        points: values
            .into_iter()
            .map(|cv| ChartPoint { label: cv.country, value: cv.value })
            .collect(),
    })
}

/// Pie chart of 2017 cell-phone counts per country. Absent values are left out.
pub fn cell_phone_pie_chart(
    table: &MergedTable,
    sub_region: &str,
) -> Result<ChartSpec, QueryError> {
    let key = ColumnKey::year(Metric::CellPhones, LAST_YEAR);
    let values = region_column(table, sub_region, key)?;
    Ok(ChartSpec {
        kind: ChartKind::Pie,
        title: "Number of Cell Phones Per UN Sub-Region".to_string(),
        x_label: None,
        y_label: None,
        points: values
            .into_iter()
            .filter(|cv| cv.value.is_some())
            .map(|cv| ChartPoint { label: cv.country, value: cv.value })
            .collect(),
    })
}

pub fn write_chart(spec: &ChartSpec, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(spec)?)?;
    tracing::info!("Wrote {:?} chart to {}", spec.kind, path.display());
    Ok(())
}
