//! Config command - manage configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::AppConfig;

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub command: ConfigSubCmd,
}

#[derive(Subcommand)]
pub enum ConfigSubCmd {
    /// Set the ripgrep binary (default: rg on PATH)
    SetRg(SetRgCmd),

    /// Set the per-project search timeout in seconds (default: 30)
    SetTimeout(SetTimeoutCmd),

    /// Set where the project registry is stored (default: ~/.git-finder-mcp)
    SetDataDir(SetDataDirCmd),

    /// Show current configuration
    Show,
}

#[derive(Args)]
pub struct SetRgCmd {
    /// Path to the rg executable
    pub path: PathBuf,
}

#[derive(Args)]
pub struct SetTimeoutCmd {
    /// Timeout in seconds
    pub seconds: u64,
}

#[derive(Args)]
pub struct SetDataDirCmd {
    /// Registry directory
    pub dir: PathBuf,
}

impl ConfigCmd {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            ConfigSubCmd::SetRg(cmd) => {
                let mut config = AppConfig::load()?;
                config.rg_path = cmd.path.clone();
                config.save()?;
                println!("ripgrep set to: {}", cmd.path.display());
            }
            ConfigSubCmd::SetTimeout(cmd) => {
                let mut config = AppConfig::load()?;
                config.timeout_secs = cmd.seconds;
                config.save()?;
                println!("Timeout set to: {}s", cmd.seconds);
            }
            ConfigSubCmd::SetDataDir(cmd) => {
                let mut config = AppConfig::load()?;
                config.data_dir = Some(cmd.dir.clone());
                config.save()?;
                println!("Data dir set to: {}", cmd.dir.display());
            }
            ConfigSubCmd::Show => {
                let config = AppConfig::load()?;
                println!("Config: {}", AppConfig::config_path()?.display());
                println!();
                println!("data_dir:          {}", config.resolve_data_dir(None)?.display());
                println!("rg_path:           {}", config.rg_path.display());
                println!("timeout_secs:      {}", config.timeout_secs);
                println!("max_output_bytes:  {}", config.max_output_bytes);
                println!("max_results:       {}", config.max_results);
                println!("context_lines:     {}", config.context_lines);
            }
        }
        Ok(())
    }
}
