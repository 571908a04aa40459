//! Server, catalog, trip store and logging settings
//!
//! Values come from an optional TOML file, then `YATRA_*` environment
//! variables (`YATRA_SERVER__PORT=9090`), then built-in defaults.

use crate::YatraError;
use crate::session::DEFAULT_SESSION_TTL_MINUTES;
use anyhow::{Context, Result, anyhow};
use chrono::Duration;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Yatra application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YatraConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Content catalog configuration
    pub catalog: CatalogConfig,
    /// Trip store configuration
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory of built front-end assets served as fallback
    pub static_dir: String,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u32,
    /// Maximum request body size in KB
    pub max_body_kb: u32,
    /// PEM certificate for HTTPS (requires `tls_key_path`)
    pub tls_cert_path: Option<String>,
    /// PEM private key for HTTPS (requires `tls_cert_path`)
    pub tls_key_path: Option<String>,
    /// Minutes a sign-in token stays valid
    pub session_ttl_minutes: u32,
}

/// Content catalog settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file; the embedded catalog is used when unset
    pub path: Option<String>,
}

/// Trip store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Trip store directory location
    pub location: String,
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_request_timeout() -> u32 {
    30
}

fn default_max_body_kb() -> u32 {
    64
}

fn default_store_location() -> String {
    "~/.local/share/yatra/trips".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            request_timeout_seconds: default_request_timeout(),
            max_body_kb: default_max_body_kb(),
            tls_cert_path: None,
            tls_key_path: None,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_store_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl YatraConfig {
    /// Load from the default config file location and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load with an explicit config file, falling back to the default location
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Explicit path first, then the per-user config directory
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides such as YATRA_SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("YATRA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: YatraConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// `<config dir>/yatra/config.toml`
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yatra").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.max_body_kb == 0 {
            self.server.max_body_kb = default_max_body_kb();
        }
        if self.server.session_ttl_minutes == 0 {
            self.server.session_ttl_minutes = DEFAULT_SESSION_TTL_MINUTES;
        }
        if self.store.location.is_empty() {
            self.store.location = default_store_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Reject out-of-range or inconsistent settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_tls()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(YatraError::config("Server port cannot be 0").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(YatraError::config(
                "Request timeout cannot exceed 300 seconds"
            ).into());
        }

        if self.server.max_body_kb > 10240 {
            return Err(YatraError::config(
                "Maximum body size cannot exceed 10240 KB (10 MB)"
            ).into());
        }

        if self.server.session_ttl_minutes > 43_200 {
            return Err(YatraError::config(
                "Session TTL cannot exceed 43200 minutes (30 days)"
            ).into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(YatraError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(YatraError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        if let Some(path) = &self.catalog.path {
            if path.trim().is_empty() {
                return Err(YatraError::config(
                    "Catalog path cannot be empty if provided. Remove it to use the built-in catalog."
                ).into());
            }
        }

        Ok(())
    }

    /// Certificate and key must be configured together
    fn validate_tls(&self) -> Result<()> {
        match (&self.server.tls_cert_path, &self.server.tls_key_path) {
            (Some(_), None) | (None, Some(_)) => Err(YatraError::config(
                "TLS requires both tls_cert_path and tls_key_path"
            ).into()),
            _ => Ok(()),
        }
    }

    /// Trip store directory with a leading `~` expanded
    pub fn store_path(&self) -> Result<PathBuf> {
        match self.store.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .ok_or_else(|| anyhow!("Unable to determine home directory")),
            None => Ok(PathBuf::from(&self.store.location)),
        }
    }

    /// Sign-in token lifetime
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(i64::from(self.server.session_ttl_minutes))
    }

    /// Address the HTTP server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = YatraConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.catalog.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = YatraConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = YatraConfig::default();
        config.server.request_timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_session_ttl_defaults_and_limits() {
        let mut config = YatraConfig::default();
        assert_eq!(config.session_ttl(), Duration::hours(12));

        config.server.session_ttl_minutes = 0;
        config.apply_defaults();
        assert_eq!(config.server.session_ttl_minutes, 720);

        config.server.session_ttl_minutes = 50_000;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Session TTL"));
    }

    #[test]
    fn test_config_validation_partial_tls() {
        let mut config = YatraConfig::default();
        config.server.tls_cert_path = Some("cert.pem".to_string());
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("TLS requires both"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = YatraConfig::default();
        config.logging.level = String::new();
        config.store.location = String::new();
        config.apply_defaults();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.store.location, "~/.local/share/yatra/trips");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9191\n\n[logging]\nformat = \"json\"\n\n[store]\nlocation = \"/tmp/yatra-trips\""
        )
        .unwrap();

        let config = YatraConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.store_path().unwrap(), PathBuf::from("/tmp/yatra-trips"));
    }

    #[test]
    fn test_store_path_expands_home() {
        let config = YatraConfig::default();
        let path = config.store_path().unwrap();
        assert!(path.ends_with(".local/share/yatra/trips"));
        assert!(!path.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_config_path_generation() {
        let path = YatraConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("yatra"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
