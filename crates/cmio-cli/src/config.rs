//! Configuration file support.
//!
//! An optional TOML file supplies defaults; command-line flags and
//! `CMIO_*` environment variables override it.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ACTING_USER: i64 = 1;

/// Contents of a `cmio.toml` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub store: StoreSection,
    pub models: ModelsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// SQLite file. Without one the store lives in memory.
    pub path: Option<PathBuf>,
    pub acting_user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelsSection {
    pub strict: Option<bool>,
}

impl FileConfig {
    /// Parse configuration from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    /// Load a configuration file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::parse(&text)
            }
            None => Ok(Self::default()),
        }
    }

    /// Database path: the command line wins over the file.
    pub fn db_path(&self, cli: Option<&Path>) -> Option<PathBuf> {
        cli.map(Path::to_path_buf).or_else(|| self.store.path.clone())
    }
}

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeSettings {
    pub host: String,
    pub port: u16,
    pub db_path: Option<PathBuf>,
    pub acting_user_id: i64,
    pub strict_models: bool,
}

impl ServeSettings {
    /// Merge command-line values over the file over built-in defaults.
    pub fn resolve(
        file: &FileConfig,
        host: Option<String>,
        port: Option<u16>,
        db: Option<&Path>,
        acting_user_id: Option<i64>,
        strict_models: bool,
    ) -> Self {
        Self {
            host: host
                .or_else(|| file.server.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            db_path: file.db_path(db),
            acting_user_id: acting_user_id
                .or(file.store.acting_user_id)
                .unwrap_or(DEFAULT_ACTING_USER),
            strict_models: strict_models || file.models.strict.unwrap_or(false),
        }
    }
}

/// Open the configured store: a seeded file database, or a fresh in-memory one.
pub fn open_store(db_path: Option<&Path>) -> Result<cmio_db::DbPool> {
    let pool = match db_path {
        Some(path) => cmio_db::init_pool(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?,
        None => cmio_db::init_memory_pool().context("Failed to create in-memory database")?,
    };
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ServeSettings::resolve(&FileConfig::default(), None, None, None, None, false);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.db_path, None);
        assert_eq!(settings.acting_user_id, 1);
        assert!(!settings.strict_models);
    }

    #[test]
    fn test_file_values() {
        let file = FileConfig::parse(
            r#"
            [server]
            port = 9100

            [store]
            path = "/var/lib/cmio/cmio.db"
            acting_user_id = 2

            [models]
            strict = true
            "#,
        )
        .unwrap();

        let settings = ServeSettings::resolve(&file, None, None, None, None, false);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.db_path, Some(PathBuf::from("/var/lib/cmio/cmio.db")));
        assert_eq!(settings.acting_user_id, 2);
        assert!(settings.strict_models);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig::parse("[server]\nhost = \"0.0.0.0\"\nport = 9100\n").unwrap();
        let settings = ServeSettings::resolve(
            &file,
            Some("localhost".to_string()),
            Some(8080),
            Some(Path::new("demo.db")),
            Some(2),
            true,
        );
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.db_path, Some(PathBuf::from("demo.db")));
        assert_eq!(settings.acting_user_id, 2);
        assert!(settings.strict_models);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(FileConfig::parse("[server]\nprot = 1\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(FileConfig::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
        assert!(FileConfig::load(None).is_ok());
    }
}
