//! Dashboard status command.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::output;

#[derive(Args)]
pub struct StatusArgs {
    /// Print the full dashboard instead of the counters
    #[arg(long)]
    pub full: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: StatusArgs, db_path: Option<&Path>) -> Result<()> {
    let pool = crate::config::open_store(db_path)?;

    if args.json {
        let json = if args.full {
            serde_json::to_string_pretty(&cmio_core::dashboard::get_snapshot(&pool)?)?
        } else {
            serde_json::to_string_pretty(&cmio_core::dashboard::get_stats(&pool)?)?
        };
        println!("{}", json);
        return Ok(());
    }

    if args.full {
        output::print_snapshot(&cmio_core::dashboard::get_snapshot(&pool)?);
    } else {
        output::print_stats(&cmio_core::dashboard::get_stats(&pool)?);
    }
    Ok(())
}
