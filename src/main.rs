mod cli;
mod commands;
mod error;
mod mcp;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfcut=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            let config = mcp::ServerConfig {
                duplicate_policy: cli.duplicates,
            };
            tracing::info!(?config, "Starting PDF MCP Server");
            mcp::run_server(config).await?;
        }
        Commands::Remove { path, pages } => {
            commands::remove::run(&path, &pages, cli.duplicates)?;
        }
    }

    Ok(())
}
