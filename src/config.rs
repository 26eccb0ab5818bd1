//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::query::Precision;
use crate::transport::TransportConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reporting API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/analytics/v3".to_string()
}

fn default_request_timeout() -> u64 {
    30_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Transport settings derived from this section
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.base_url.clone(),
            access_token: self.access_token.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Defaults applied to queries built by the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Rows requested per page (`max-results`)
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde(default)]
    pub precision: Precision,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            precision: Precision::Default,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("analytics-query").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(url) = std::env::var("ANALYTICS_QUERY_BASE_URL") {
            self.api.base_url = url;
        }
        if let Ok(token) = std::env::var("ANALYTICS_QUERY_ACCESS_TOKEN") {
            self.api.access_token = Some(token);
        }
        if let Ok(timeout) = std::env::var("ANALYTICS_QUERY_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.api.request_timeout_ms = ms;
            }
        }

        // Query overrides
        if let Ok(size) = std::env::var("ANALYTICS_QUERY_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.query.page_size = Some(n);
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("ANALYTICS_QUERY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ANALYTICS_QUERY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# analytics-query configuration
#
# Environment variables override these settings:
# - ANALYTICS_QUERY_BASE_URL
# - ANALYTICS_QUERY_ACCESS_TOKEN
# - ANALYTICS_QUERY_TIMEOUT_MS
# - ANALYTICS_QUERY_PAGE_SIZE
# - ANALYTICS_QUERY_LOG_LEVEL
# - ANALYTICS_QUERY_LOG_FORMAT

[api]
# Core Reporting API base URL
base_url = "https://www.googleapis.com/analytics/v3"

# OAuth access token (prefer the environment variable)
# access_token = ""

# Request timeout in milliseconds
request_timeout_ms = 30000

[query]
# Rows requested per page; the API default is 1000
# page_size = 1000

# Sampling precision: FASTER, DEFAULT or HIGH_PRECISION
precision = "DEFAULT"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.api.base_url, "https://www.googleapis.com/analytics/v3");
        assert_eq!(config.api.request_timeout_ms, 30_000);
        assert!(config.api.access_token.is_none());
        assert_eq!(config.query.precision, Precision::Default);
        assert_eq!(config.query.page_size, None);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[query]\npage_size = 250\nprecision = \"HIGH_PRECISION\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.query.page_size, Some(250));
        assert_eq!(config.query.precision, Precision::HighPrecision);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.api.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_load_rejects_bad_precision() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[query]\nprecision = \"EXACT\"").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("missing.toml"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_transport_config() {
        let api = ApiConfig {
            access_token: Some("token".to_string()),
            ..ApiConfig::default()
        };
        let transport = api.transport();

        assert_eq!(transport.base_url, api.base_url);
        assert_eq!(transport.access_token.as_deref(), Some("token"));
    }
}
