//! MCP Specialist CLI entry point.

use anyhow::Result;
use clap::Parser;
use mcp_specialist::cli::{commands, Cli, Commands};
use mcp_specialist::config::Settings;
use mcp_specialist::ServerError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match &cli.config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    };
    let mut settings = Settings::load_from(Some(&config_path))?;
    cli.server.apply(&mut settings.server);

    // Initialize logging. stderr only: stdout may be the protocol channel.
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let directives =
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("mcp_specialist={}", log_level));
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| ServerError::Config(format!("invalid log filter '{}': {}", directives, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            commands::run_mcp(settings).await?;
        }

        Commands::Stdio => {
            commands::run_stdio(settings).await?;
        }

        Commands::Serve => {
            commands::run_serve(settings).await?;
        }

        Commands::Tools => {
            commands::run_tools(settings)?;
        }

        Commands::Call { tool, arguments } => {
            commands::run_call(&tool, &arguments, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, &settings, &config_path)?;
        }
    }

    Ok(())
}
