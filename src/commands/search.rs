//! Search command - keyword search across registered projects.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::tools::SearchRequest;

#[derive(Args)]
pub struct SearchCmd {
    /// Keyword (smart-case: case-insensitive unless it contains uppercase)
    pub keyword: String,

    /// Project to search within
    #[arg(short, long)]
    pub project: Option<String>,

    /// File glob filter, e.g. "*.ts"
    #[arg(short = 'g', long)]
    pub file_pattern: Option<String>,

    /// Max results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Context lines around each match
    #[arg(short = 'C', long)]
    pub context: Option<usize>,
}

impl SearchCmd {
    pub async fn run(&self, data_dir: Option<&Path>) -> Result<()> {
        let tools = super::toolbox(data_dir)?;

        let start = std::time::Instant::now();
        let outcome = tools
            .search_code(&SearchRequest {
                keyword: self.keyword.clone(),
                project: self.project.clone(),
                file_pattern: self.file_pattern.clone(),
                max_results: self.limit,
                context_lines: self.context,
            })
            .await;
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "search finished");

        super::report(outcome)
    }
}
