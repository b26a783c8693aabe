//! Configuration merger for CLI arguments and config files
//!
//! Precedence, highest first: `serve` flags, global flags, `SHOP_*`
//! environment variables, configuration files.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file-based configuration.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration honoring `--config` and `--env`.
    ///
    /// Validation is deferred to [`merge_cli_args`](Self::merge_cli_args) so a
    /// CLI flag can still repair a file value.
    ///
    /// # Errors
    /// Returns `ConfigError` if the sources cannot be found or parsed.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path.clone());
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        tracing::debug!(
            environment = loader.environment().as_str(),
            config_dir = %loader.config_dir().display(),
            "Loading configuration"
        );

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Returns a validated copy of the base configuration with CLI overrides
    /// applied.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);
        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }
                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }
                // Takes precedence over --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::tests::{BASE_CONFIG, EnvGuard, TEST_MUTEX, setup_config_dir};
    use clap::Parser;

    fn valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = valid_base_config();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_verbose_flag_sets_debug() {
        assert_eq!(merge(&["shop-rs", "--verbose"]).unwrap().logger.level, "debug");
    }

    #[test]
    fn test_quiet_flag_sets_error() {
        assert_eq!(merge(&["shop-rs", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_host_and_port_override() {
        let merged = merge(&["shop-rs", "serve", "--host", "0.0.0.0", "--port", "9090"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 9090);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["shop-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merged_config_is_validated() {
        let cli = Cli::try_parse_from(["shop-rs", "serve"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_from_cli_uses_explicit_file_and_env() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let dir = setup_config_dir(&[("single.toml", BASE_CONFIG)]);
        let path = dir.path().join("single.toml");

        let cli = Cli::try_parse_from([
            "shop-rs",
            "--config",
            path.to_str().unwrap(),
            "--env",
            "test",
            "serve",
            "--port",
            "4000",
        ])
        .unwrap();

        let merger = ConfigurationMerger::from_cli(&cli).unwrap();
        assert_eq!(merger.config().application.name, "test-shop");
        assert_eq!(merger.config().server.port, 3000);

        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server.port, 4000);
    }
}
