//! Configuration settings structures
//!
//! Everything here can be loaded from TOML files and overridden through
//! `SHOP_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::models::NewItem;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "shop-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/shop.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_token_expiration() -> i64 {
    240 // 10 days
}

fn default_catalog_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            name: "Round Widget".to_string(),
            price: "2.99".to_string(),
            description: "A widget that is round".to_string(),
        },
        CatalogItem {
            name: "Square Widget".to_string(),
            price: "1.99".to_string(),
            description: "A widget that is square".to_string(),
        },
    ]
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// JWT Configuration
// ============================================================================

/// Token signing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC secret; at least 32 characters. Supply it through
    /// `SHOP_JWT__SECRET` outside development.
    #[serde(default)]
    pub secret: String,

    /// Token lifetime in hours
    #[serde(default = "default_token_expiration")]
    pub expiration_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: default_token_expiration(),
        }
    }
}

/// Longest accepted token lifetime, ten years in hours
pub const MAX_TOKEN_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

impl JwtConfig {
    /// Token lifetime, clamped to `1..=MAX_TOKEN_EXPIRATION_HOURS` hours.
    pub fn horizon(&self) -> SignedDuration {
        SignedDuration::from_hours(self.expiration_hours.clamp(1, MAX_TOKEN_EXPIRATION_HOURS))
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    /// "full", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Converts the file representation into the runtime `LoggerConfig`.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file", e.to_string()))
    }
}

// ============================================================================
// Catalog Configuration
// ============================================================================

/// One catalog entry seeded at start-up.
///
/// The price is kept as a string so it never passes through a float.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
}

impl CatalogItem {
    pub fn parse_price(&self) -> Result<BigDecimal, ConfigError> {
        BigDecimal::from_str(self.price.trim()).map_err(|e| {
            ConfigError::validation(
                "catalog.items.price",
                format!("Invalid price '{}' for '{}': {}", self.price, self.name, e),
            )
        })
    }

    pub fn to_new_item(&self) -> Result<NewItem, ConfigError> {
        Ok(NewItem {
            name: self.name.clone(),
            price: self.parse_price()?,
            description: self.description.clone(),
        })
    }
}

/// Catalog seeding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_items")]
    pub items: Vec<CatalogItem>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items: default_catalog_items(),
        }
    }
}

impl CatalogConfig {
    pub fn new_items(&self) -> Result<Vec<NewItem>, ConfigError> {
        self.items.iter().map(CatalogItem::to_new_item).collect()
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub jwt: JwtConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub catalog: CatalogConfig,
}
