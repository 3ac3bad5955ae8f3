//! Spreadsheet reader (first worksheet only).

use super::{Cell, RawTable};
use crate::error::PipelineError;
use anyhow::{anyhow, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

pub fn read_first_sheet(path: &Path, name: &str) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| anyhow!("Excel: {}", e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("Excel file has no worksheets"))?
        .map_err(|e| anyhow!("Excel: {}", e))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(PipelineError::EmptyTable(name.to_string()).into());
    };
    let headers: Vec<String> =
        header_row.iter().map(|c| convert(c).as_text().unwrap_or_default()).collect();
    let body: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(convert).collect()).collect();

    Ok(RawTable::new(name, headers, body))
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) if f.is_finite() => Cell::Number(*f),
        Data::Float(_) => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
