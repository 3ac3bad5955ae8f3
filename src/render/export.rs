//! CSV export of the merged table.

use crate::domain::{MergedTable, COUNTRY_COLUMN, SUB_REGION_COLUMN};
use anyhow::{Context, Result};
use std::path::Path;

pub const MERGED_TABLE_FILE: &str = "combined_data_frame.csv";

/// Write the merged table with a two-row header: metric codes, then years or
/// delta labels. Absent cells and unassigned sub-regions are empty.
pub fn write_merged_csv(table: &MergedTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let keys = table.columns().keys();
    let mut metric_header = vec![String::new(), String::new()];
    metric_header.extend(keys.iter().map(|k| k.metric.code().to_string()));
    let mut field_header = vec![SUB_REGION_COLUMN.to_string(), COUNTRY_COLUMN.to_string()];
    field_header.extend(keys.iter().map(|k| k.field_label()));
    wtr.write_record(&metric_header)?;
    wtr.write_record(&field_header)?;

    for (key, values) in table.rows() {
        let mut record = vec![key.sub_region.name().unwrap_or("").to_string(), key.country.clone()];
        record.extend(values.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()));
        wtr.write_record(&record)?;
    }
    wtr.flush().with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote merged table to {}", path.display());
    Ok(())
}
