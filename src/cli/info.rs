//! Info command implementation

use anyhow::Result;
use clap::Args;

use super::InputArgs;
use crate::config::CliOverrides;
use crate::domain::Metric;
use crate::pipeline::{load_and_merge, InputPaths};
use crate::utils::table_fingerprint;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let config = args.input.resolve(CliOverrides::default())?;
    let merged = load_and_merge(&InputPaths {
        cell_phones: config.cell_phones,
        internet_users: config.internet_users,
        codes: config.codes,
    })?;
    let table = &merged.table;

    println!("Merged table: {} rows x {} columns", table.row_count(), table.column_count());
    println!("Fingerprint: {}", table_fingerprint(table));

    println!("Sub-regions:");
    for (idx, region) in table.sub_regions().into_iter().enumerate() {
        println!("  {idx:>2}  {region} ({} countries)", table.rows_in_region(region).count());
    }

    let unassigned = table.unassigned_countries();
    if !unassigned.is_empty() {
        println!("Countries without a sub-region ({}):", unassigned.len());
        for country in unassigned {
            println!("  {country}");
        }
    }

    println!("Missing cells:");
    for metric in Metric::ALL {
        println!("  {}: {}", metric, table.missing_cells(metric));
    }
    println!(
        "Pivot view: {} rows x {} columns",
        merged.pivot.rows.len(),
        merged.pivot.columns.len()
    );

    Ok(())
}
