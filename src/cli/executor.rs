//! Command executor for dispatching CLI commands

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// Runs the parsed command against merged settings.
///
/// Returning `Ok(())` for a non-dry-run `serve` (or no subcommand) tells the
/// caller to start the server.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).execute(true).await
        }
        Some(Commands::Serve { .. }) | None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    #[tokio::test]
    async fn test_no_command_signals_server_start() {
        let cli = Cli::try_parse_from(["shop-rs"]).unwrap();
        assert!(execute_command(&cli, valid_settings()).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_validates_settings() {
        let cli = Cli::try_parse_from(["shop-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_settings()).await.is_ok());

        let mut broken = valid_settings();
        broken.catalog.items[0].price = "two dollars".to_string();
        assert!(execute_command(&cli, broken).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_argument_combination_is_rejected() {
        let cli = Cli::try_parse_from(["shop-rs", "serve", "--host", "0.0.0.0", "--port", "80"])
            .unwrap();

        let result = execute_command(&cli, valid_settings()).await;

        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "cli_arguments"));
    }
}
