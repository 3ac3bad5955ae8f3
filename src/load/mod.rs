//! Table loading from delimited text and spreadsheet files.
//!
//! The loader does no cleanup beyond cell typing; everything else is the
//! normalizer's job.

use anyhow::{Context, Result};
use std::path::Path;

pub mod delimited;
pub mod encoding;
pub mod excel;

use crate::error::PipelineError;

/// A single cell as read from a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Type a raw text cell. Numbers with thousands separators are accepted.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Cell::Empty;
        }
        match trimmed.replace(',', "").parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    /// Text view of the cell; numbers render without a trailing `.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(format_number_label(*n)),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// A table exactly as loaded: a header row plus untyped rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Source label used in error messages (usually the file name).
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { name: name.into(), headers, rows }
    }

    /// Position of a column by case-insensitive header match.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    }
}

/// Load a table, choosing the reader from the file extension.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("table").to_string();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => delimited::read_delimited(path, &name, b','),
        "tsv" | "txt" => delimited::read_delimited(path, &name, b'\t'),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => excel::read_first_sheet(path, &name),
        _ => {
            return Err(PipelineError::UnsupportedFormat {
                extension: ext,
                path: path.display().to_string(),
            }
            .into())
        }
    }
    .with_context(|| format!("Failed to load table: {}", path.display()))?;

    tracing::debug!(
        "Loaded {}: {} columns, {} rows",
        table.name,
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

/// Spreadsheets often store year headers as floats (`1995.0`).
fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 => format_number_label(n),
        _ => trimmed.to_string(),
    }
}

fn format_number_label(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_typing() {
        assert_eq!(Cell::from_text(""), Cell::Empty);
        assert_eq!(Cell::from_text(" NaN "), Cell::Empty);
        assert_eq!(Cell::from_text("1,234.5"), Cell::Number(1234.5));
        assert_eq!(Cell::from_text("Norway"), Cell::Text("Norway".to_string()));
        assert_eq!(Cell::from_text("inf"), Cell::Text("inf".to_string()));
    }

    #[test]
    fn year_headers_lose_float_suffix() {
        let table = RawTable::new(
            "t",
            vec!["country".into(), "1995.0".into(), " 2017 ".into()],
            vec![vec![Cell::Text("chad".into())]],
        );
        assert_eq!(table.headers, vec!["country", "1995", "2017"]);
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.column("COUNTRY"), Some(0));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_table(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("unsupported input format"));
    }
}
