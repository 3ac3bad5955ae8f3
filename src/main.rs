//! country-tech: UN country tech statistics by sub-region
//!
//! Loads the cell phone, internet usage and UN code tables, merges them, and
//! reports statistics for an interactively selected sub-region.

use anyhow::Result;

fn main() -> Result<()> {
    country_tech::cli::run()
}
