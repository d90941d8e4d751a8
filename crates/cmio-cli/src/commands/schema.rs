//! Schema command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    print!("{}", cmio_db::SCHEMA);
    Ok(())
}
