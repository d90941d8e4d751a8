//! Web server command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{self, FileConfig, ServeSettings};
use cmio_web::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on [default: 8000]
    #[arg(long, env = "CMIO_PORT")]
    pub port: Option<u16>,

    /// Host to bind to [default: 127.0.0.1]
    #[arg(long, env = "CMIO_HOST")]
    pub host: Option<String>,

    /// User recorded as reviewer of facts [default: 1]
    #[arg(long, env = "CMIO_ACTING_USER")]
    pub acting_user: Option<i64>,

    /// Reject model selections outside the known options
    #[arg(long, env = "CMIO_STRICT_MODELS")]
    pub strict_models: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log [default: cmio-serve.log]
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, file: &FileConfig, db: Option<&Path>) -> Result<()> {
    let settings = ServeSettings::resolve(
        file,
        args.host,
        args.port,
        db,
        args.acting_user,
        args.strict_models,
    );

    let pool = config::open_store(settings.db_path.as_deref())?;
    cmio_db::queries::users::get_user(&pool, settings.acting_user_id)
        .with_context(|| format!("Acting user {} does not exist", settings.acting_user_id))?;

    tracing::info!(
        acting_user = settings.acting_user_id,
        strict_models = settings.strict_models,
        "Store ready"
    );

    let state = AppState::new(Arc::new(pool))
        .with_acting_user(settings.acting_user_id)
        .with_strict_models(settings.strict_models);

    println!();
    println!("  {} {}", "CMIO".cyan().bold(), "Dashboard".bold());
    println!();
    println!(
        "  {}  http://{}:{}",
        "Dashboard".green(),
        settings.host,
        settings.port
    );
    println!(
        "  {}      {}",
        "Store".green(),
        settings
            .db_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "in-memory (sample data)".to_string())
    );
    if settings.strict_models {
        println!("  {}     {}", "Models".green(), "strict");
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    cmio_web::run_server(state, &settings.host, settings.port).await?;

    Ok(())
}
