//! git-finder - keyword code search across registered local projects.

mod browse;
mod cli;
mod commands;
mod config;
mod projects;
mod search;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // MCP mode inits its own subscriber (writes to stderr), so skip here
    if !matches!(cli.command, Command::Mcp(_)) {
        // Initialize tracing for non-MCP commands (controlled by RUST_LOG env var)
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    cli.command.execute(cli.data_dir.as_deref()).await
}
