//! Command-line interface for country-tech
//!
//! Provides `run` and `info` subcommands sharing one set of input options.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides, Config};

mod info;
mod run;
mod utils;

/// Merge UN country tech datasets and report sub-region statistics
#[derive(Parser)]
#[command(name = "country-tech")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the datasets, select a sub-region and report statistics
    Run(run::RunArgs),

    /// Merge the datasets and describe the merged table without querying it
    Info(info::InfoArgs),
}

/// Where the three input tables come from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Directory holding the input files and an optional country-tech.toml
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Explicit config file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cell phones by country table
    #[arg(long, value_name = "FILE")]
    pub cell_phones: Option<PathBuf>,

    /// Internet users (% of population) by country table
    #[arg(long, value_name = "FILE")]
    pub internet_users: Option<PathBuf>,

    /// UN codes table (country, UN region, UN sub-region)
    #[arg(long, value_name = "FILE")]
    pub codes: Option<PathBuf>,
}

impl InputArgs {
    /// Load the config file and apply these flags plus `extra` on top.
    fn resolve(&self, extra: CliOverrides) -> Result<Config> {
        let config = load_config(&self.data_dir, self.config.as_deref())?;
        let overrides = CliOverrides {
            cell_phones: self.cell_phones.clone(),
            internet_users: self.internet_users.clone(),
            codes: self.codes.clone(),
            ..extra
        };
        Ok(merge_cli_with_config(config, overrides, Path::new(&self.data_dir)))
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Run(args) => run::run(args),
        Commands::Info(args) => info::run(args),
    }
}
