//! Application configuration management.
//!
//! Configuration is merged from default values, an optional configuration
//! file, and environment variables, in increasing order of precedence.

use crate::Cli;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Ranking store configuration (remote call timeout)
    #[serde(default)]
    pub store: catalog_store::config::StoreConfig,

    /// Database configuration (file path, creation)
    #[serde(default)]
    pub database: catalog_sqlite::config::SqliteConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Store the catalog in a file
    /// export APP_DATABASE__DATABASE_PATH="catalog.db"
    ///
    /// # Give up on remote calls after five seconds
    /// export APP_STORE__REMOTE_TIMEOUT="5s"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // This maps APP_STORE__REMOTE_TIMEOUT to store.remote_timeout
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;
    use std::{path::PathBuf, time::Duration};

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["catalogdemo", "list"]).unwrap();
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.remote_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("catalogdemo-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[store]\nremote_timeout = \"250ms\"\n\n[database]\ndatabase_path = \"shop.db\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from(["catalogdemo", "--config", path.to_str().unwrap(), "list"])
            .unwrap();
        let config = AppConfig::load(&cli);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.store.remote_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.database.database_path, Some(PathBuf::from("shop.db")));
        assert!(config.database.create_if_missing);
    }

    #[test]
    fn test_missing_config_file() {
        let cli =
            Cli::try_parse_from(["catalogdemo", "--config", "/nonexistent/app.toml", "list"])
                .unwrap();
        assert!(AppConfig::load(&cli).is_err());
    }
}
