//! Run command implementation

use anyhow::{bail, Result};
use clap::Args;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use super::utils::parse_year_pair;
use super::InputArgs;
use crate::config::CliOverrides;
use crate::pipeline::{load_and_merge, InputPaths};
use crate::render::text;
use crate::select::{self, LinePrompter, Selection, TerminalPrompter};
use crate::session::{run_session, SessionOptions};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Sub-region name or index (skips the prompts together with --metric and --years)
    #[arg(short, long, value_name = "REGION")]
    pub region: Option<String>,

    /// Data type: 1 = cell phones, 2 = internet users
    #[arg(short, long, value_name = "METRIC")]
    pub metric: Option<String>,

    /// Two years to average, comma-separated (e.g. 2000,2010)
    #[arg(short, long, value_name = "YEARS")]
    pub years: Option<String>,

    /// Directory for charts, the merged table export and the report
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not write chart files
    #[arg(long)]
    pub no_charts: bool,

    /// Do not write the merged table export
    #[arg(long)]
    pub no_export: bool,

    /// Omit the timestamp from report.json
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = args.input.resolve(CliOverrides {
        output_dir: args.output_dir.clone(),
        no_charts: args.no_charts,
        no_export: args.no_export,
        no_timestamp: args.no_timestamp,
        ..CliOverrides::default()
    })?;

    println!("\n{}\n", text::banner("Country Tech Data/Stats"));
    println!("Importing country tech data files and UN codes and preparing the merged table...");
    let mut merged = load_and_merge(&InputPaths {
        cell_phones: config.cell_phones.clone(),
        internet_users: config.internet_users.clone(),
        codes: config.codes.clone(),
    })?;
    println!("\nSnapshot of the merged table with row and column multi-keys:\n");
    println!("{}", text::merged_head(&merged.table, 5));

    let regions: Vec<String> = merged.table.sub_regions().into_iter().map(str::to_string).collect();
    let selection = obtain_selection(&args, &regions)?;

    match selection {
        Some(selection) => {
            let options = SessionOptions {
                output_dir: config.output_dir.clone(),
                charts: config.charts,
                export: config.export,
                report_timestamp: config.report_timestamp,
            };
            let outcome = run_session(&mut merged, &selection, &options, &mut io::stdout().lock())?;
            for path in &outcome.written {
                println!("Wrote {}", path.display());
            }
        }
        None => tracing::info!("Quit requested; skipping queries and exports"),
    }

    println!("\n{}\n", text::banner("Country Tech Data/Stats - Program Terminated"));
    Ok(())
}

fn obtain_selection(args: &RunArgs, regions: &[String]) -> Result<Option<Selection>> {
    match (&args.region, &args.metric, &args.years) {
        (Some(region), Some(metric), Some(years)) => {
            let (year0, year1) = parse_year_pair(years)?;
            Ok(select::selection_from_values(region, metric, &year0, &year1, regions)?)
        }
        (None, None, None) => {
            if io::stdin().is_terminal() && io::stderr().is_terminal() {
                select::collect_selection(&mut TerminalPrompter::new(), regions)
            } else {
                let mut prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
                select::collect_selection(&mut prompter, regions)
            }
        }
        _ => bail!("--region, --metric and --years must be given together"),
    }
}
