use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use url::Url;
use validator::{Validate, ValidationError};

use crate::errors::ConnectionError;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const CONFIG_DIR: &str = "config";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3306;
const DEFAULT_USER: &str = "root";
const DEFAULT_DATABASE: &str = "pharma_db";
const DEFAULT_CHARSET: &str = "utf8mb4";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REPORT_PATH: &str = "analytics_report.txt";
const DEFAULT_DASHBOARD_PATH: &str = "dashboard.png";
const DEFAULT_DASHBOARD_TITLE: &str = "Pharmaceutical Supply Chain Analytics Dashboard";
const DEFAULT_DASHBOARD_WIDTH: u32 = 2000;
const DEFAULT_DASHBOARD_HEIGHT: u32 = 1500;

/// SQLite database name that selects a private in-memory store.
pub const SQLITE_MEMORY: &str = ":memory:";

/// Relational backends the metric catalog is written for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mysql,
    Sqlite,
}

/// Connection settings for one analytics session
#[derive(Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    #[serde(default = "default_backend")]
    pub backend: DatabaseBackend,

    /// Server host (ignored for SQLite)
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// Server port (ignored for SQLite)
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// Database name, or the file path for SQLite
    #[serde(default = "default_database")]
    #[validate(length(min = 1))]
    pub database: String,

    #[serde(default = "default_charset")]
    #[validate(custom = "validate_charset")]
    pub charset: String,

    #[serde(default = "default_true_bool")]
    pub autocommit: bool,

    /// Full connection URL; overrides every other connection field when set
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_connect_timeout_secs")]
    #[validate(range(min = 1))]
    pub connect_timeout_secs: u64,
}

impl ConnectionConfig {
    /// MySQL settings with the stock defaults
    pub fn mysql(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            backend: DatabaseBackend::Mysql,
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
            charset: default_charset(),
            autocommit: true,
            url: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// SQLite settings for a database file, or [`SQLITE_MEMORY`]
    pub fn sqlite(database: impl Into<String>) -> Self {
        Self {
            backend: DatabaseBackend::Sqlite,
            host: default_host(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            database: database.into(),
            charset: default_charset(),
            autocommit: true,
            url: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// Builds the driver URL, percent-encoding credentials
    pub fn connection_url(&self) -> Result<String, ConnectionError> {
        if let Some(url) = self.url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.clone());
        }

        match self.backend {
            DatabaseBackend::Sqlite if self.database == SQLITE_MEMORY => {
                Ok("sqlite::memory:".to_string())
            }
            DatabaseBackend::Sqlite => Ok(format!("sqlite://{}?mode=rwc", self.database)),
            DatabaseBackend::Mysql => {
                let invalid = |what: &str| {
                    ConnectionError::InvalidSettings(format!("{} is not usable in a URL", what))
                };

                let mut url = Url::parse(&format!("mysql://{}", self.host))
                    .map_err(|e| ConnectionError::InvalidSettings(format!("host: {}", e)))?;
                url.set_port(Some(self.port)).map_err(|_| invalid("port"))?;
                url.set_username(&self.user).map_err(|_| invalid("user"))?;
                if !self.password.is_empty() {
                    url.set_password(Some(&self.password))
                        .map_err(|_| invalid("password"))?;
                }
                url.set_path(&self.database);
                url.query_pairs_mut().append_pair("charset", &self.charset);
                Ok(url.to_string())
            }
        }
    }

    /// Human-readable target without credentials
    pub fn display_target(&self) -> String {
        match self.backend {
            DatabaseBackend::Sqlite => format!("sqlite:{}", self.database),
            DatabaseBackend::Mysql => format!("{}:{}/{}", self.host, self.port, self.database),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("charset", &self.charset)
            .field("autocommit", &self.autocommit)
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Dashboard artifact settings
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default = "default_true_bool")]
    pub enabled: bool,

    #[serde(default = "default_dashboard_path")]
    #[validate(length(min = 1))]
    pub path: String,

    #[serde(default = "default_dashboard_title")]
    pub title: String,

    #[serde(default = "default_dashboard_width")]
    #[validate(range(min = 300, max = 10000))]
    pub width: u32,

    #[serde(default = "default_dashboard_height")]
    #[validate(range(min = 300, max = 10000))]
    pub height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_dashboard_path(),
            title: default_dashboard_title(),
            width: default_dashboard_width(),
            height: default_dashboard_height(),
        }
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[validate]
    pub database: ConnectionConfig,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    #[serde(default)]
    #[validate]
    pub dashboard: DashboardConfig,

    /// Where the text report is written
    #[serde(default = "default_report_path")]
    #[validate(length(min = 1))]
    pub report_path: String,

    /// Profile the file layers were selected with (`RUN_ENV`/`APP_ENV`)
    #[serde(skip)]
    pub profile: String,
}

impl AppConfig {
    /// Creates a configuration around the given connection settings
    pub fn new(database: ConnectionConfig) -> Self {
        Self {
            database,
            log_level: default_log_level(),
            log_json: false,
            dashboard: DashboardConfig::default(),
            report_path: default_report_path(),
            profile: DEFAULT_ENV.to_string(),
        }
    }

    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Reports which configuration was loaded. Call after [`init_tracing`].
    pub fn log_loaded(&self) {
        info!("Loaded configuration for environment: {}", self.profile);
        if !Path::new(CONFIG_DIR).exists() {
            info!(
                "Config directory '{}' not found; using defaults and environment variables",
                CONFIG_DIR
            );
        }
        info!(db = %self.database.display_target(), "Configuration loaded successfully");
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_backend() -> DatabaseBackend {
    DatabaseBackend::Mysql
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_report_path() -> String {
    DEFAULT_REPORT_PATH.to_string()
}

fn default_dashboard_path() -> String {
    DEFAULT_DASHBOARD_PATH.to_string()
}

fn default_dashboard_title() -> String {
    DEFAULT_DASHBOARD_TITLE.to_string()
}

fn default_dashboard_width() -> u32 {
    DEFAULT_DASHBOARD_WIDTH
}

fn default_dashboard_height() -> u32 {
    DEFAULT_DASHBOARD_HEIGHT
}

fn default_true_bool() -> bool {
    true
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

fn validate_charset(charset: &str) -> Result<(), ValidationError> {
    let valid = !charset.is_empty()
        && charset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("charset");
        err.message = Some("Character set must be an identifier such as utf8mb4".into());
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("pharma_analytics={},sqlx=warn,sea_orm=warn", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let builder = fmt().with_env_filter(EnvFilter::new(filter_directive));
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.with_target(false).try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*, e.g. APP__DATABASE__PASSWORD)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let config = Config::builder()
        .set_default("database.backend", "mysql")?
        .set_default("database.host", DEFAULT_HOST)?
        .set_default("database.port", i64::from(DEFAULT_PORT))?
        .set_default("database.user", DEFAULT_USER)?
        .set_default("database.password", "")?
        .set_default("database.database", DEFAULT_DATABASE)?
        .set_default("database.charset", DEFAULT_CHARSET)?
        .set_default("database.autocommit", true)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;
    app_config.profile = run_env;
    Ok(app_config)
}
