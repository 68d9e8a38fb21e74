//! List command - list registered projects.

use std::path::Path;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct ListCmd {
    /// Show only project names
    #[arg(long)]
    pub names_only: bool,
}

impl ListCmd {
    pub async fn run(&self, data_dir: Option<&Path>) -> Result<()> {
        let tools = super::toolbox(data_dir)?;

        if self.names_only {
            for project in tools.store().list()? {
                println!("{}", project.name);
            }
            return Ok(());
        }

        super::report(tools.list_projects())
    }
}
