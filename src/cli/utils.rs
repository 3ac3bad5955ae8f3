//! Shared CLI utilities.

use anyhow::{bail, Result};

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.
pub fn parse_csv(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|part| !part.is_empty()).map(str::to_string).collect()
}

/// Split `--years 2000,2010` into its two raw values. Range checks happen in
/// the selector.
pub fn parse_year_pair(value: &str) -> Result<(String, String)> {
    match parse_csv(value).as_slice() {
        [first, second] => Ok((first.clone(), second.clone())),
        _ => bail!("--years expects two comma-separated years, e.g. 2000,2010 (got '{value}')"),
    }
}
