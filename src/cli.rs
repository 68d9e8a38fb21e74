//! CLI argument definitions.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::commands::{
    AddCmd, ConfigCmd, ListCmd, McpCmd, ReadCmd, RemoveCmd, SearchCmd, TreeCmd,
};

#[derive(Parser)]
#[command(name = "git-finder")]
#[command(about = "git-finder - keyword code search across your local projects")]
#[command(version)]
pub struct Cli {
    /// Directory holding the project registry (default: ~/.git-finder-mcp)
    #[arg(long, global = true, env = "GIT_FINDER_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a local project directory
    Add(AddCmd),

    /// Remove a registered project
    Remove(RemoveCmd),

    /// List registered projects
    List(ListCmd),

    /// Search registered projects for a keyword
    Search(SearchCmd),

    /// Show the file tree of a project
    Tree(TreeCmd),

    /// Print a file from a registered project
    Read(ReadCmd),

    /// Run as MCP server (for AI tools)
    Mcp(McpCmd),

    /// Manage configuration (ripgrep path, timeouts, ...)
    Config(ConfigCmd),
}

impl Command {
    pub async fn execute(&self, data_dir: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Command::Add(cmd) => cmd.run(data_dir).await,
            Command::Remove(cmd) => cmd.run(data_dir).await,
            Command::List(cmd) => cmd.run(data_dir).await,
            Command::Search(cmd) => cmd.run(data_dir).await,
            Command::Tree(cmd) => cmd.run(data_dir).await,
            Command::Read(cmd) => cmd.run(data_dir).await,
            Command::Mcp(cmd) => cmd.run(data_dir).await,
            Command::Config(cmd) => cmd.run().await,
        }
    }
}
