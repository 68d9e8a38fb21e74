//! Read command - print a file from a registered project.

use std::path::Path;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct ReadCmd {
    /// File path (must be inside a registered project)
    pub path: String,
}

impl ReadCmd {
    pub async fn run(&self, data_dir: Option<&Path>) -> Result<()> {
        let tools = super::toolbox(data_dir)?;
        super::report(tools.read_file(&self.path))
    }
}
