//! # API Configuration
//!
//! Configuration management for the REST server.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WEBSHOP_PORT=9000                                                  │
//! │     WEBSHOP_RATE_URL=https://api.hnb.hr/tecajn/v1?valuta=EUR           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $WEBSHOP_CONFIG, or                                                │
//! │     ~/.config/webshop/webshop.toml (Linux)                             │
//! │     ~/Library/Application Support/hr.webshop.webshop/webshop.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! path = "webshop.db"
//! max_connections = 5
//!
//! [rates]
//! url = "https://api.hnb.hr/tecajn/v1?valuta=EUR"
//! timeout_secs = 10      # optional, transport default when absent
//! cache_ttl_secs = 0     # 0 = fetch a fresh rate for every submission
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use webshop_db::DbConfig;
use webshop_rates::DEFAULT_HNB_URL;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "WEBSHOP_CONFIG";

// =============================================================================
// Errors
// =============================================================================

/// Failure to load or validate configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Server Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address (default: 0.0.0.0 for all interfaces).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file, created if missing.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("webshop.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseSettings {
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.path.clone()).max_connections(self.max_connections)
    }
}

// =============================================================================
// Rate Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSettings {
    /// Rate-list endpoint.
    #[serde(default = "default_rate_url")]
    pub url: String,

    /// Request timeout (seconds). `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// How long a fetched rate is reused (seconds). 0 disables caching.
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

fn default_rate_url() -> String {
    DEFAULT_HNB_URL.to_string()
}

impl Default for RateSettings {
    fn default() -> Self {
        RateSettings {
            url: default_rate_url(),
            timeout_secs: None,
            cache_ttl_secs: 0,
        }
    }
}

impl RateSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Cache window, present only when caching is enabled.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub rates: RateSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, `$WEBSHOP_CONFIG`, or the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.rates.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "Rate URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("WEBSHOP_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = parse_env::<u16>("WEBSHOP_PORT") {
            debug!(port, "Overriding port from environment");
            self.server.port = port;
        }

        if let Ok(path) = std::env::var("WEBSHOP_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = parse_env::<u32>("WEBSHOP_DB_MAX_CONNECTIONS") {
            self.database.max_connections = max;
        }

        if let Ok(url) = std::env::var("WEBSHOP_RATE_URL") {
            debug!(url = %url, "Overriding rate URL from environment");
            self.rates.url = url;
        }

        if let Some(secs) = parse_env::<u64>("WEBSHOP_RATE_TIMEOUT_SECS") {
            self.rates.timeout_secs = Some(secs);
        }

        if let Some(secs) = parse_env::<u64>("WEBSHOP_RATE_CACHE_TTL_SECS") {
            self.rates.cache_ttl_secs = secs;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("hr", "webshop", "webshop")
            .map(|dirs| dirs.config_dir().join("webshop.toml"))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database.path, PathBuf::from("webshop.db"));
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.rates.url, DEFAULT_HNB_URL);
        assert!(config.rates.timeout().is_none());
        assert!(config.rates.cache_ttl().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [rates]
            timeout_secs = 3
            cache_ttl_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.rates.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.rates.cache_ttl(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_rejects_non_http_rate_url() {
        let mut config = AppConfig::default();
        config.rates.url = "ftp://rates.example".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_connections() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("webshop-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[database]\npath = \"/tmp/shop.db\"\nmax_connections = 2\n").unwrap();

        let config = AppConfig::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.path, PathBuf::from("/tmp/shop.db"));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!("webshop-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server\nport = ").unwrap();

        let result = AppConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
