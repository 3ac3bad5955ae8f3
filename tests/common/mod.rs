//! Shared CSV fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const CELLS: &str = "cells.csv";
pub const NET: &str = "net.csv";
pub const CODES: &str = "codes.csv";

/// One CSV row over 1995..=2017: `first` in 1995, `last` in 2017, `middle`
/// elsewhere, with the listed years left blank.
pub fn year_row(country: &str, first: f64, middle: f64, last: f64, blank: &[u16]) -> String {
    let mut cells = vec![country.to_string()];
    for year in 1995..=2017u16 {
        let value = match year {
            _ if blank.contains(&year) => String::new(),
            1995 => first.to_string(),
            2017 => last.to_string(),
            _ => middle.to_string(),
        };
        cells.push(value);
    }
    cells.join(",")
}

pub fn year_header(extra_before: &[&str], extra_after: &[&str]) -> String {
    let mut header = vec!["country".to_string()];
    header.extend(extra_before.iter().map(|s| s.to_string()));
    header.extend((1995..=2017u16).map(|y| y.to_string()));
    header.extend(extra_after.iter().map(|s| s.to_string()));
    header.join(",")
}

pub fn cells_csv() -> String {
    [
        year_header(&[], &[]),
        year_row("Kenya", 100.0, 120.0, 250.0, &[]),
        year_row("Uganda", 5.0, 6.0, 7.0, &[]),
        year_row("Peru", 10.0, 20.0, 30.0, &[2000]),
        year_row("Netherlands", 1.0, 1.5, 2.0, &[]),
        year_row("KENYA", 100.0, 120.0, 250.0, &[]),
    ]
    .join("\n")
}

pub fn net_csv() -> String {
    [
        year_header(&[], &[]),
        year_row("Kenya", 0.5, 5.0, 17.0, &[]),
        year_row("Uganda", 0.1, 2.0, 20.0, &[]),
        year_row("Peru", 1.0, 10.0, 50.0, &[]),
        year_row("Fiji", 2.0, 15.0, 45.0, &[]),
    ]
    .join("\n")
}

pub fn codes_csv() -> String {
    [
        "Country,UN Region,UN Sub-Region",
        "Kenya,Africa,Eastern Africa",
        "Uganda,Africa,Eastern Africa",
        "Peru,Americas,South America",
        "Fiji,Oceania,Melanesia",
    ]
    .join("\n")
}

/// Write the three tables plus a config file pointing at them.
pub fn write_fixture(dir: &Path) {
    fs::write(dir.join(CELLS), cells_csv()).expect("write cells");
    fs::write(dir.join(NET), net_csv()).expect("write net");
    fs::write(dir.join(CODES), codes_csv()).expect("write codes");
    fs::write(
        dir.join("country-tech.toml"),
        format!(
            "cell_phones = '{CELLS}'\ninternet_users = '{NET}'\n\
             codes = '{CODES}'\noutput_dir = 'out'\n"
        ),
    )
    .expect("write config");
}
