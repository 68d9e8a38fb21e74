//! Tree command - show a project's file tree.

use std::path::Path;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct TreeCmd {
    /// Project name
    pub project: String,

    /// Tree depth
    #[arg(short, long, default_value = "3")]
    pub depth: usize,
}

impl TreeCmd {
    pub async fn run(&self, data_dir: Option<&Path>) -> Result<()> {
        let tools = super::toolbox(data_dir)?;
        super::report(tools.get_file_tree(&self.project, Some(self.depth)))
    }
}
