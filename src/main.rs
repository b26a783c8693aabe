use clap::Parser;

use shop_rs::cli::{self, Cli};
use shop_rs::config::Environment;
use shop_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    cli::execute_command(&cli, settings.clone()).await?;
    if cli.is_dry_run() {
        return Ok(());
    }

    let environment = cli.env.map(Environment::from).unwrap_or_else(Environment::from_env);
    Server::new(settings, environment).run().await
}
