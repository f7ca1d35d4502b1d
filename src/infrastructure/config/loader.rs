use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".cognate";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid feedback_pause_ms: {0}. Must be at least 1")]
    InvalidFeedbackPause(u64),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .cognate/config.yaml (project config, created by init)
    /// 3. .cognate/local.yaml (local overrides, optional)
    /// 4. Environment variables (COGNATE_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration rooted at `root` instead of the current directory.
    pub fn load_from(root: &Path) -> Result<Config> {
        let dir = root.join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("COGNATE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(config.database.max_connections));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        if config.session.feedback_pause_ms == 0 {
            return Err(ConfigError::InvalidFeedbackPause(config.session.feedback_pause_ms));
        }

        let remote = &config.remote;
        if remote.enabled {
            if remote.base_url.as_deref().map_or(true, |url| url.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed(
                    "remote.base_url is required when remote sync is enabled".to_string(),
                ));
            }
            if remote.identity_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed(
                    "remote.identity_id is required when remote sync is enabled".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, ".cognate/cognate.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.session.feedback_pause_ms, 700);
        assert!(!config.remote.enabled);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
database:
  path: /custom/path.db
  max_connections: 4
logging:
  level: debug
  format: pretty
session:
  feedback_pause_ms: 400
remote:
  enabled: true
  base_url: https://progress.example.com
  identity_id: ada
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.database.path, "/custom/path.db");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.rotation, "daily");
        assert_eq!(config.session.feedback_pause_ms, 400);
        assert_eq!(config.session.outcome_display_ms, 2500);
        assert_eq!(config.remote.identity_id.as_deref(), Some("ada"));

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.database.path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDatabasePath)
        ));
    }

    #[test]
    fn test_validate_zero_max_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxConnections(0))
        ));
    }

    #[test]
    fn test_validate_zero_feedback_pause() {
        let mut config = Config::default();
        config.session.feedback_pause_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidFeedbackPause(0))
        ));
    }

    #[test]
    fn test_validate_remote_requires_identity() {
        let mut config = Config::default();
        config.remote.enabled = true;
        config.remote.base_url = Some("https://progress.example.com".to_string());
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_hierarchical_merging() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yaml"), "logging:\n  level: info\n  format: pretty\n").unwrap();
        fs::write(dir.join("local.yaml"), "logging:\n  level: debug\n").unwrap();

        let config = temp_env::with_vars_unset(["COGNATE_LOGGING__LEVEL"], || {
            ConfigLoader::load_from(root.path()).unwrap()
        });

        assert_eq!(config.logging.level, "debug", "Override should win");
        assert_eq!(config.logging.format, "pretty", "Base value should persist");
    }

    #[test]
    fn test_env_override() {
        let root = tempfile::tempdir().unwrap();
        let config = temp_env::with_vars(
            [
                ("COGNATE_LOGGING__LEVEL", Some("warn")),
                ("COGNATE_SESSION__FEEDBACK_PAUSE_MS", Some("250")),
            ],
            || ConfigLoader::load_from(root.path()).unwrap(),
        );

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.session.feedback_pause_ms, 250);
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let result = temp_env::with_var("COGNATE_LOGGING__FORMAT", Some("xml"), || {
            ConfigLoader::load_from(root.path())
        });
        assert!(result.is_err());
    }
}
