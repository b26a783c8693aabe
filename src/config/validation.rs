//! Configuration validation logic
//!
//! Every section validates itself; `Settings::validate` reports the first
//! failure found.

use std::collections::HashSet;

use bigdecimal::BigDecimal;

use crate::config::error::ConfigError;
use crate::config::settings::{
    CatalogConfig, JwtConfig, LoggerSettings, MAX_TOKEN_EXPIRATION_HOURS, ServerConfig, Settings,
};

/// Shortest accepted HMAC secret
const MIN_SECRET_LEN: usize = 32;

impl ServerConfig {
    /// Host must be non-empty and the port non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty. Set SHOP_JWT__SECRET.",
            ));
        }

        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::validation(
                "jwt.secret",
                format!("JWT secret must be at least {} characters", MIN_SECRET_LEN),
            ));
        }

        if self.expiration_hours <= 0 {
            return Err(ConfigError::validation(
                "jwt.expiration_hours",
                "Token expiration must be positive",
            ));
        }

        if self.expiration_hours > MAX_TOKEN_EXPIRATION_HOURS {
            return Err(ConfigError::validation(
                "jwt.expiration_hours",
                format!(
                    "Token expiration cannot exceed {} hours",
                    MAX_TOKEN_EXPIRATION_HOURS
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Valid when it converts into a runtime `LoggerConfig`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clone().into_logger_config().map(|_| ())
    }
}

impl CatalogConfig {
    /// Names must be non-empty and unique; prices must parse and not be negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(ConfigError::validation(
                    "catalog.items.name",
                    "Catalog item name cannot be empty",
                ));
            }

            if !seen.insert(item.name.as_str()) {
                return Err(ConfigError::validation(
                    "catalog.items.name",
                    format!("Catalog item '{}' is listed twice", item.name),
                ));
            }

            if item.parse_price()? < BigDecimal::default() {
                return Err(ConfigError::validation(
                    "catalog.items.price",
                    format!("Price of '{}' cannot be negative", item.name),
                ));
            }
        }

        Ok(())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{CatalogItem, FileSettings};

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    fn field_of(error: ConfigError) -> String {
        match error {
            ConfigError::Validation { field, .. } => field,
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_with_secret_are_valid() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_default_settings_lack_secret() {
        let error = Settings::default().validate().unwrap_err();
        assert_eq!(field_of(error), "jwt.secret");
    }

    #[test]
    fn test_server_port_zero() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        assert_eq!(field_of(settings.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_short_secret() {
        let mut settings = valid_settings();
        settings.jwt.secret = "short".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "jwt.secret");
    }

    #[test]
    fn test_non_positive_expiration() {
        let mut settings = valid_settings();
        settings.jwt.expiration_hours = 0;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "jwt.expiration_hours"
        );
    }

    #[test]
    fn test_oversized_expiration() {
        let mut settings = valid_settings();
        settings.jwt.expiration_hours = MAX_TOKEN_EXPIRATION_HOURS;
        assert!(settings.validate().is_ok());

        for hours in [MAX_TOKEN_EXPIRATION_HOURS + 1, i64::MAX] {
            settings.jwt.expiration_hours = hours;
            assert_eq!(
                field_of(settings.validate().unwrap_err()),
                "jwt.expiration_hours"
            );
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logger.level = "chatty".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger");
    }

    #[test]
    fn test_invalid_log_format() {
        let mut settings = valid_settings();
        settings.logger.file = FileSettings {
            format: "xml".to_string(),
            ..FileSettings::default()
        };
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "logger.file.format"
        );
    }

    #[test]
    fn test_catalog_rules() {
        let item = |name: &str, price: &str| CatalogItem {
            name: name.to_string(),
            price: price.to_string(),
            description: String::new(),
        };

        let mut settings = valid_settings();
        settings.catalog.items = vec![item("Widget", "1.00"), item("Widget", "2.00")];
        assert_eq!(field_of(settings.validate().unwrap_err()), "catalog.items.name");

        settings.catalog.items = vec![item("Widget", "-1.00")];
        assert_eq!(field_of(settings.validate().unwrap_err()), "catalog.items.price");

        settings.catalog.items = vec![item("Widget", "cheap")];
        assert_eq!(field_of(settings.validate().unwrap_err()), "catalog.items.price");

        settings.catalog.items = vec![item("  ", "1.00")];
        assert_eq!(field_of(settings.validate().unwrap_err()), "catalog.items.name");

        settings.catalog.items = Vec::new();
        assert!(settings.validate().is_ok());
    }
}
