//! Core domain types: metrics, the canonical year range, composite keys, and
//! the merged multi-key table.

use serde::Serialize;
use std::fmt;

pub mod table;

pub use table::{ColumnIndex, MergedTable};

/// First year kept after dropping sparse columns.
pub const FIRST_YEAR: u16 = 1995;
/// Last year kept after dropping sparse columns.
pub const LAST_YEAR: u16 = 2017;

/// Header of the country column in every input table.
pub const COUNTRY_COLUMN: &str = "country";
/// Header of the sub-region column in the code table.
pub const SUB_REGION_COLUMN: &str = "un sub-region";
/// Header of the coarse region column, dropped during normalization.
pub const REGION_COLUMN: &str = "un region";

/// The canonical year set, ascending.
pub fn canonical_years() -> impl DoubleEndedIterator<Item = u16> + Clone {
    FIRST_YEAR..=LAST_YEAR
}

pub fn is_canonical_year(year: i64) -> bool {
    (i64::from(FIRST_YEAR)..=i64::from(LAST_YEAR)).contains(&year)
}

/// One of the two measured quantities.
///
/// Variant order is the canonical column order of the merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    #[serde(rename = "number_cells")]
    CellPhones,
    #[serde(rename = "internet_users")]
    InternetUsers,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::CellPhones, Metric::InternetUsers];

    /// Short code used in exports and on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Metric::CellPhones => "number_cells",
            Metric::InternetUsers => "internet_users",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Metric::CellPhones => "number of cell phones",
            Metric::InternetUsers => "internet users %",
        }
    }

    /// Label of the derived 1995 to 2017 difference column.
    pub fn delta_label(self) -> &'static str {
        match self {
            Metric::CellPhones => "Cell Phone Difference",
            Metric::InternetUsers => "Internet Difference",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Second level of a column key: a year, or the derived delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Year(u16),
    Delta,
}

/// Composite column key `(metric, year)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnKey {
    pub metric: Metric,
    pub field: Field,
}

impl ColumnKey {
    pub fn year(metric: Metric, year: u16) -> Self {
        Self { metric, field: Field::Year(year) }
    }

    pub fn delta(metric: Metric) -> Self {
        Self { metric, field: Field::Delta }
    }

    /// Second-level header text ("1995", "Internet Difference", ...).
    pub fn field_label(&self) -> String {
        match self.field {
            Field::Year(year) => year.to_string(),
            Field::Delta => self.metric.delta_label().to_string(),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.metric, self.field_label())
    }
}

/// First level of a row key.
///
/// Countries with no code-table entry are `Unassigned`, which sorts after
/// every named sub-region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Assigned(String),
    Unassigned,
}

impl Region {
    pub fn name(&self) -> Option<&str> {
        match self {
            Region::Assigned(name) => Some(name),
            Region::Unassigned => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Assigned(name) => f.write_str(name),
            Region::Unassigned => f.write_str("(unassigned)"),
        }
    }
}

/// Composite row key `(sub-region, country)`. Unique within a [`MergedTable`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    pub sub_region: Region,
    pub country: String,
}

impl RowKey {
    pub fn new(sub_region: Region, country: impl Into<String>) -> Self {
        Self { sub_region, country: country.into() }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.sub_region, self.country)
    }
}

/// A per-country value produced by a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryValue<T = f64> {
    pub country: String,
    pub value: T,
}

/// Compare two optional cells for exact equality. Absent equals absent.
pub fn cells_equal(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.to_bits() == y.to_bits(),
        _ => false,
    }
}
