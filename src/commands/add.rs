//! Add command - register a local project directory.

use std::path::Path;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct AddCmd {
    /// Project directory
    pub path: String,

    /// Unique project name
    #[arg(short, long)]
    pub name: String,

    /// What the project is about
    #[arg(short, long)]
    pub description: Option<String>,
}

impl AddCmd {
    pub async fn run(&self, data_dir: Option<&Path>) -> Result<()> {
        let tools = super::toolbox(data_dir)?;
        super::report(tools.add_project(&self.path, &self.name, self.description.as_deref()))
    }
}
