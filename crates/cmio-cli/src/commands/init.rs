//! Database initialization command.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

pub fn execute(db_path: Option<&Path>) -> Result<()> {
    let Some(path) = db_path else {
        bail!("init needs a database file: pass --db or set [store] path in the config");
    };

    let existed = path.exists();
    crate::config::open_store(Some(path))?;

    if existed {
        println!("{} {}", "✓".green().bold(), format!("Database up to date: {}", path.display()));
    } else {
        println!("{} {}", "✓".green().bold(), format!("Created database: {}", path.display()));
    }
    Ok(())
}
