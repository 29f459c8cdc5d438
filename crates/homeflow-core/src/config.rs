/*!
 * Configuration management for homeflow.
 *
 * Settings are layered: built-in defaults, then an optional TOML file, then
 * environment variables carrying a prefix (`HOMEFLOW__STORAGE__SAVE_FILE`).
 */
use std::path::{Path, PathBuf};

use config::{Config as ConfigLib, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General configuration
    #[serde(default)]
    pub general: GeneralConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Snapshot storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Directory holding the save file
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to use JSON format for logs
    #[serde(default)]
    pub json_format: bool,
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Save file name, relative to `general.data_dir` unless absolute
    #[serde(default = "default_save_file")]
    pub save_file: String,
}

impl Config {
    /// Full path of the device snapshot file
    pub fn save_path(&self) -> PathBuf {
        Path::new(&self.general.data_dir).join(&self.storage.save_file)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_file: default_save_file(),
        }
    }
}

fn default_app_name() -> String {
    "homeflow".to_string()
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_save_file() -> String {
    "devices.json".to_string()
}

/// A builder for creating a configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    environment_prefix: Option<String>,
}

impl ConfigBuilder {
    /// Create a new ConfigBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the config file path
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix for configuration
    pub fn with_environment_prefix<S: AsRef<str>>(mut self, prefix: S) -> Self {
        self.environment_prefix = Some(prefix.as_ref().to_string());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let defaults = ConfigLib::try_from(&Config::default())
            .map_err(|e| Error::config(format!("Failed to create default config: {}", e)))?;
        let mut builder = ConfigLib::builder().add_source(defaults);

        if let Some(path) = self.config_file {
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                builder = builder.add_source(File::with_name(&path.to_string_lossy()));
            } else {
                debug!(
                    "Configuration file {} does not exist, using defaults",
                    path.display()
                );
            }
        }

        if let Some(prefix) = self.environment_prefix {
            debug!("Loading configuration from environment variables with prefix {}", prefix);
            builder = builder.add_source(
                Environment::with_prefix(&prefix)
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: Config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize configuration: {}", e)))?;

        info!(save_path = %config.save_path().display(), "Configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.app_name, "homeflow");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert_eq!(config.storage.save_file, "devices.json");
        assert_eq!(config.save_path(), Path::new(".").join("devices.json"));
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.general.app_name, "homeflow");
        assert_eq!(config.storage.save_file, "devices.json");
    }

    #[test]
    fn test_config_builder_missing_file_falls_back() {
        let dir = tempdir().unwrap();
        let config = ConfigBuilder::new()
            .with_config_file(dir.path().join("absent.toml"))
            .build()
            .unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_builder_with_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("homeflow.toml");
        fs::write(
            &file_path,
            r#"
                [general]
                data_dir = "/var/lib/homeflow"

                [logging]
                level = "debug"

                [storage]
                save_file = "house.json"
            "#,
        )?;

        let config = ConfigBuilder::new().with_config_file(&file_path).build()?;

        assert_eq!(config.general.app_name, "homeflow");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.save_path(),
            Path::new("/var/lib/homeflow").join("house.json")
        );

        Ok(())
    }

    #[test]
    fn test_config_builder_with_env() -> Result<()> {
        env::set_var("HOMEFLOWTEST__STORAGE__SAVE_FILE", "env.json");
        env::set_var("HOMEFLOWTEST__LOGGING__LEVEL", "trace");

        let config = ConfigBuilder::new()
            .with_environment_prefix("homeflowtest")
            .build()?;

        assert_eq!(config.storage.save_file, "env.json");
        assert_eq!(config.logging.level, "trace");

        env::remove_var("HOMEFLOWTEST__STORAGE__SAVE_FILE");
        env::remove_var("HOMEFLOWTEST__LOGGING__LEVEL");

        Ok(())
    }
}
