//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod init;
pub mod schema;
pub mod serve;
pub mod status;

use crate::config::FileConfig;

/// CMIO - care coordination dashboard
#[derive(Parser)]
#[command(name = "cmio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "CMIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file (in-memory when omitted)
    #[arg(long, global = true, env = "CMIO_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard web server
    Serve(serve::ServeArgs),

    /// Create a database file with the schema and sample data
    Init,

    /// Show dashboard counters
    Status(status::StatusArgs),

    /// Print the database schema
    Schema,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let file = FileConfig::load(self.config.as_deref())?;
        let db_path = file.db_path(self.db.as_deref());

        match self.command {
            Commands::Serve(args) => serve::execute(args, &file, self.db.as_deref()).await,
            Commands::Init => init::execute(db_path.as_deref()),
            Commands::Status(args) => status::execute(args, db_path.as_deref()),
            Commands::Schema => schema::execute(),
        }
    }
}
