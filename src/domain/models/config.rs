use serde::{Deserialize, Serialize};

/// Main configuration structure for Cognate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Trial and outcome pacing
    #[serde(default)]
    pub session: SessionTimingConfig,

    /// Remote progress store
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            session: SessionTimingConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".cognate/cognate.db".to_string()
}

const fn default_max_connections() -> u32 {
    2
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (none disables file output)
    #[serde(default = "default_log_dir")]
    pub log_dir: Option<String>,

    /// Log file rotation: daily, hourly, never
    #[serde(default = "default_log_rotation")]
    pub rotation: String,

    /// Also log to stderr
    #[serde(default)]
    pub stderr: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_log_dir() -> Option<String> {
    Some(".cognate/logs".to_string())
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: default_log_dir(),
            rotation: default_log_rotation(),
            stderr: false,
        }
    }
}

/// Fixed display pauses between engine states
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionTimingConfig {
    /// How long feedback stays on screen before the next trial
    #[serde(default = "default_feedback_pause_ms")]
    pub feedback_pause_ms: u64,

    /// How long a session outcome is shown before returning to idle
    #[serde(default = "default_outcome_display_ms")]
    pub outcome_display_ms: u64,
}

const fn default_feedback_pause_ms() -> u64 {
    700
}

const fn default_outcome_display_ms() -> u64 {
    2500
}

impl Default for SessionTimingConfig {
    fn default() -> Self {
        Self {
            feedback_pause_ms: default_feedback_pause_ms(),
            outcome_display_ms: default_outcome_display_ms(),
        }
    }
}

/// Remote progress store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteConfig {
    /// Whether to sync progress with the remote store
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the progress API
    #[serde(default)]
    pub base_url: Option<String>,

    /// Identity the local user is authenticated as
    #[serde(default)]
    pub identity_id: Option<String>,

    /// Name shown on the leaderboard
    #[serde(default)]
    pub display_name: Option<String>,

    /// Bearer token for the progress API
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,

    /// Give up retrying a remote call after this many milliseconds
    #[serde(default = "default_max_retry_elapsed_ms")]
    pub max_retry_elapsed_ms: u64,
}

const fn default_remote_timeout_secs() -> u64 {
    10
}

const fn default_max_retry_elapsed_ms() -> u64 {
    5_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            identity_id: None,
            display_name: None,
            api_token: None,
            timeout_secs: default_remote_timeout_secs(),
            max_retry_elapsed_ms: default_max_retry_elapsed_ms(),
        }
    }
}
