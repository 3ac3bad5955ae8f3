//! Output rendering (text tables, CSV export, chart specs, run report)

pub mod chart;
pub mod export;
pub mod report;
pub mod text;

pub use chart::{cell_phone_pie_chart, internet_bar_chart, write_chart};
pub use export::write_merged_csv;
pub use report::{write_report, RunSummary};
