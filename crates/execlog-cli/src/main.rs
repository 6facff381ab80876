mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use execlog_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = config.install()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.filter))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        cli::Commands::Patterns { json } => commands::patterns::handle(json),
        cli::Commands::Mask {
            value,
            pattern,
            regex,
        } => commands::mask::handle(&value, pattern.as_deref(), regex),
        cli::Commands::Config(config_cmd) => commands::config::handle(config_cmd, config),
        cli::Commands::Demo => commands::demo::handle().await,
        cli::Commands::Serve { port } => commands::serve::handle(port).await,
    }
}
