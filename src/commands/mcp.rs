//! MCP command - run as an MCP server.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::tools::mcp;

#[derive(Args)]
pub struct McpCmd;

impl McpCmd {
    pub async fn run(&self, data_dir: Option<&Path>) -> Result<()> {
        // Logging to stderr (stdout is for MCP protocol)
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init();

        let tools = super::toolbox(data_dir)?;
        info!(registry = %tools.store().document_path().display(), "git-finder-mcp server started");

        mcp::run_stdio(tools).await
    }
}
