//! CLI command implementations.

mod add;
mod config;
mod list;
mod mcp;
mod read;
mod remove;
mod search;
mod tree;

pub use add::AddCmd;
pub use config::ConfigCmd;
pub use list::ListCmd;
pub use mcp::McpCmd;
pub use read::ReadCmd;
pub use remove::RemoveCmd;
pub use search::SearchCmd;
pub use tree::TreeCmd;

use std::path::Path;

use anyhow::Result;

use crate::config::AppConfig;
use crate::search::RipgrepEngine;
use crate::tools::{ToolOutcome, Toolbox};

/// Build the tool handlers from config, honoring a data dir override.
pub(crate) fn toolbox(data_dir: Option<&Path>) -> Result<Toolbox<RipgrepEngine>> {
    let config = AppConfig::load()?;
    let store = config.project_store(data_dir)?;
    Ok(Toolbox::new(
        store,
        config.search_engine(),
        config.search_options(),
    ))
}

/// Print a successful outcome; turn a failure into an error exit.
pub(crate) fn report(outcome: ToolOutcome) -> Result<()> {
    match outcome {
        ToolOutcome::Success(text) => {
            println!("{}", text.trim_end());
            Ok(())
        }
        ToolOutcome::Failure(text) => anyhow::bail!(text),
    }
}
