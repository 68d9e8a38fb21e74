//! Remove command - unregister a project.

use std::path::Path;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct RemoveCmd {
    /// Project name
    pub name: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl RemoveCmd {
    pub async fn run(&self, data_dir: Option<&Path>) -> Result<()> {
        let tools = super::toolbox(data_dir)?;

        if !self.yes {
            println!("Remove project '{}'?", self.name);
            print!("[y/N] ");
            std::io::Write::flush(&mut std::io::stdout())?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Aborted.");
                return Ok(());
            }
        }

        super::report(tools.remove_project(&self.name))
    }
}
