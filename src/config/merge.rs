//! Apply command-line overrides on top of a loaded config.

use super::Config;
use std::path::{Path, PathBuf};

/// Values given on the command line. `None` / `false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub cell_phones: Option<PathBuf>,
    pub internet_users: Option<PathBuf>,
    pub codes: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub no_charts: bool,
    pub no_export: bool,
    pub no_timestamp: bool,
}

/// CLI paths are used as given; config paths resolve against `data_dir`.
pub fn merge_cli_with_config(config: Config, cli: CliOverrides, data_dir: &Path) -> Config {
    let resolve = |path: PathBuf| if path.is_absolute() { path } else { data_dir.join(path) };

    Config {
        cell_phones: cli.cell_phones.unwrap_or_else(|| resolve(config.cell_phones)),
        internet_users: cli.internet_users.unwrap_or_else(|| resolve(config.internet_users)),
        codes: cli.codes.unwrap_or_else(|| resolve(config.codes)),
        output_dir: cli.output_dir.unwrap_or_else(|| resolve(config.output_dir)),
        charts: config.charts && !cli.no_charts,
        export: config.export && !cli.no_export,
        report_timestamp: config.report_timestamp && !cli.no_timestamp,
    }
}
