//! CSV / TSV reader.

use super::{encoding, Cell, RawTable};
use crate::error::PipelineError;
use anyhow::{Context, Result};
use std::path::Path;

pub fn read_delimited(path: &Path, name: &str, delimiter: u8) -> Result<RawTable> {
    let (text, used) = encoding::read_text(path)?;
    tracing::debug!("Decoded {} as {}", path.display(), used);
    parse_delimited(name, &text, delimiter)
}

/// Parse delimited text whose first record is the header row.
pub fn parse_delimited(name: &str, text: &str, delimiter: u8) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("Failed to read headers of {name}"))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(PipelineError::EmptyTable(name.to_string()).into());
    }

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read row {} of {name}", i + 1))?;
        if record.len() > headers.len() {
            tracing::warn!(
                "{name}: row {} has {} fields, header has {}; extra fields dropped",
                i + 1,
                record.len(),
                headers.len()
            );
        }
        rows.push(record.iter().take(headers.len()).map(Cell::from_text).collect());
    }

    Ok(RawTable::new(name, headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_typed_cells() {
        let table =
            parse_delimited("cells.csv", "country,1995,2017\nNorway,100,\nChad,,5\n", b',')
                .expect("parse");
        assert_eq!(table.headers, vec!["country", "1995", "2017"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], Cell::Text("Norway".into()));
        assert_eq!(table.rows[0][1], Cell::Number(100.0));
        assert_eq!(table.rows[0][2], Cell::Empty);
    }

    #[test]
    fn short_rows_are_padded() {
        let table =
            parse_delimited("t.tsv", "country\t1995\t1996\nChad\t1\n", b'\t').expect("parse");
        assert_eq!(table.rows[0], vec![Cell::Text("Chad".into()), Cell::Number(1.0), Cell::Empty]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(parse_delimited("empty.csv", "", b',').is_err());
    }
}
