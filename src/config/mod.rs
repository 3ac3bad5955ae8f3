//! Configuration loading and merging
//!
//! Handles loading from config files and command-line flags with proper
//! precedence (CLI > File > Defaults).

pub mod loader;
pub mod merge;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};

/// Run configuration. Relative paths resolve against the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cell_phones: PathBuf,
    pub internet_users: PathBuf,
    pub codes: PathBuf,
    pub output_dir: PathBuf,
    pub charts: bool,
    pub export: bool,
    pub report_timestamp: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_phones: PathBuf::from("total_cell_phones_by_country.xlsx"),
            internet_users: PathBuf::from("percentage_population_internet_users.xlsx"),
            codes: PathBuf::from("UN Codes.xlsx"),
            output_dir: PathBuf::from("."),
            charts: true,
            export: true,
            report_timestamp: true,
        }
    }
}
