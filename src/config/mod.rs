//! Configuration management
//!
//! Layered loading from TOML files plus `SHOP_*` environment overrides.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `SHOP_*` environment variables
//! 5. Command-line flags

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{CatalogConfig, CatalogItem, JwtConfig, LoggerSettings, ServerConfig, Settings};
