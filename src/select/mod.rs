//! Operator selection of sub-region, metric and years.
//!
//! Validation is separate from prompting: each `parse_*` function returns a
//! typed answer or a specific rejection, and the prompt loop in
//! [`collect_selection`] decides whether to ask again.

use crate::domain::{is_canonical_year, Metric, FIRST_YEAR, LAST_YEAR};
use crate::normalize::fold;
use crate::query::Selector;
use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

pub mod prompt;

pub use prompt::{LinePrompter, Prompter, TerminalPrompter};

const QUIT: &str = "quit";
const HELP: &str = "help";

/// A validated answer, or the operator's request to stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid UN Sub-Region '{0}'.")]
    UnknownRegion(String),

    #[error("Invalid data type '{0}'. Enter 1 for cell phones or 2 for internet usage.")]
    InvalidMetric(String),

    #[error("Invalid year '{0}'. Please enter a whole year.")]
    InvalidYear(String),

    #[error("Year {0} is outside the available range {}-{}.", FIRST_YEAR, LAST_YEAR)]
    YearOutOfRange(i64),
}

/// Everything the query phase needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub sub_region: String,
    pub metric: Metric,
    pub year0: u16,
    pub year1: u16,
}

impl Selection {
    pub fn selector(&self) -> Selector {
        Selector::new(self.sub_region.clone(), self.metric)
    }
}

fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(QUIT)
}

/// Accept a sub-region name (any case) or its index in `regions`.
pub fn parse_region(input: &str, regions: &[String]) -> Result<Answer<String>, SelectionError> {
    if is_quit(input) {
        return Ok(Answer::Quit);
    }
    let wanted = fold(input.trim());
    if let Some(name) = regions.iter().find(|r| **r == wanted) {
        return Ok(Answer::Value(name.clone()));
    }
    match wanted.parse::<usize>().ok().and_then(|idx| regions.get(idx)) {
        Some(name) => Ok(Answer::Value(name.clone())),
        None => Err(SelectionError::UnknownRegion(input.trim().to_string())),
    }
}

/// `1` / `number_cells` or `2` / `internet_users`.
pub fn parse_metric(input: &str) -> Result<Answer<Metric>, SelectionError> {
    let code = fold(input.trim());
    match code.as_str() {
        QUIT => Ok(Answer::Quit),
        "1" | "number_cells" => Ok(Answer::Value(Metric::CellPhones)),
        "2" | "internet_users" => Ok(Answer::Value(Metric::InternetUsers)),
        _ => Err(SelectionError::InvalidMetric(input.trim().to_string())),
    }
}

pub fn parse_year(input: &str) -> Result<Answer<u16>, SelectionError> {
    if is_quit(input) {
        return Ok(Answer::Quit);
    }
    let year: i64 =
        input.trim().parse().map_err(|_| SelectionError::InvalidYear(input.trim().to_string()))?;
    if !is_canonical_year(year) {
        return Err(SelectionError::YearOutOfRange(year));
    }
    Ok(Answer::Value(year as u16))
}

/// Index and name of every selectable sub-region.
pub fn region_table(regions: &[String]) -> String {
    let width = regions.len().saturating_sub(1).to_string().len();
    let mut out = String::from("Valid UN sub-region names and index values:\n");
    for (idx, name) in regions.iter().enumerate() {
        out.push_str(&format!("  {idx:>width$}  {name}\n"));
    }
    out
}

/// Build a selection from pre-supplied values (command-line flags).
///
/// Any value equal to `quit` ends the run like the interactive quit.
pub fn selection_from_values(
    region: &str,
    metric: &str,
    year0: &str,
    year1: &str,
    regions: &[String],
) -> Result<Option<Selection>, SelectionError> {
    let Answer::Value(sub_region) = parse_region(region, regions)? else {
        return Ok(None);
    };
    let Answer::Value(metric) = parse_metric(metric)? else {
        return Ok(None);
    };
    let Answer::Value(year0) = parse_year(year0)? else {
        return Ok(None);
    };
    let Answer::Value(year1) = parse_year(year1)? else {
        return Ok(None);
    };
    Ok(Some(Selection { sub_region, metric, year0, year1 }))
}

/// Run the prompt sequence. `Ok(None)` means the operator quit.
pub fn collect_selection<P: Prompter>(
    prompter: &mut P,
    regions: &[String],
) -> Result<Option<Selection>> {
    prompter.say(
        "This program provides UN country tech data organized by UN sub-region, \
         country and year:\n  \
         1. Total cell phones by country\n  \
         2. Percentage of population using the internet\n\n\
         Enter \"quit\" at any prompt to exit. Inputs are case-insensitive.\n\
         Sub-regions can be selected by name or by the numeric index shown.\n\
         The two years entered are averaged for the chosen data type.",
    )?;
    let first = prompter.ask("Enter \"quit\" to exit the program, or any key to continue")?;
    if is_quit(&first) {
        return Ok(None);
    }
    prompter.say(&region_table(regions))?;

    let sub_region = loop {
        let input = prompter.ask("Please enter a UN Sub-Region name or numeric index value")?;
        match parse_region(&input, regions) {
            Ok(Answer::Value(name)) => break name,
            Ok(Answer::Quit) => return Ok(None),
            Err(err) => {
                prompter.say(&err.to_string())?;
                let help = prompter.ask(
                    "Enter \"help\" to see the UN Sub-Region table, or any other key to continue",
                )?;
                if is_quit(&help) {
                    return Ok(None);
                }
                if help.trim().eq_ignore_ascii_case(HELP) {
                    prompter.say(&region_table(regions))?;
                }
            }
        }
    };
    prompter.say(&format!("Selection: {sub_region}"))?;

    let Some(metric) = ask_until(
        prompter,
        "For Cell Phone data enter \"1\", for Internet Usage (%) enter \"2\"",
        parse_metric,
    )?
    else {
        return Ok(None);
    };
    prompter.say(&format!("Selection: {} data", metric.description()))?;

    let Some(year0) =
        ask_until(prompter, "Enter the 1st specific year of data for average calc", parse_year)?
    else {
        return Ok(None);
    };
    let Some(year1) =
        ask_until(prompter, "Enter the 2nd specific year of data for average calc", parse_year)?
    else {
        return Ok(None);
    };

    let selection = Selection { sub_region, metric, year0, year1 };
    tracing::info!(
        "Selection: sub-region={}, data={}, years={} and {}",
        selection.sub_region,
        selection.metric,
        selection.year0,
        selection.year1
    );
    Ok(Some(selection))
}

fn ask_until<P, T, F>(prompter: &mut P, question: &str, parse: F) -> Result<Option<T>>
where
    P: Prompter,
    F: Fn(&str) -> Result<Answer<T>, SelectionError>,
{
    loop {
        let input = prompter.ask(question)?;
        match parse(&input) {
            Ok(Answer::Value(value)) => return Ok(Some(value)),
            Ok(Answer::Quit) => return Ok(None),
            Err(err) => {
                prompter.say(&format!("{err} Please try again, or enter \"quit\" to exit."))?
            }
        }
    }
}
