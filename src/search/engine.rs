//! ripgrep-backed search engine.
//!
//! Each call spawns one `rg --json` process for a single project root and
//! streams its stdout through a [`MatchAssembler`]. The process is bounded by
//! a wall-clock timeout and an output ceiling; hitting either kills it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use super::error::SearchError;
use super::models::{SearchMatch, SearchOptions};
use super::parser::MatchAssembler;
use crate::projects::ScopeEntry;

/// Paths never searched: build output, dependencies, VCS data, lockfiles and
/// minified/source-map artifacts.
pub const EXCLUDE_GLOBS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    ".next",
    "coverage",
    "__pycache__",
    ".turbo",
    ".cache",
    "*.lock",
    "*.map",
    "*.min.js",
    "*.min.css",
];

/// Per-file match cap, independent of the global result cap.
pub const MAX_MATCHES_PER_FILE: usize = 10;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// ripgrep's exit code for "searched fine, found nothing".
const EXIT_NO_MATCHES: i32 = 1;

/// A query against one project root.
#[derive(Debug, Clone, Copy)]
pub struct RootQuery<'a> {
    pub keyword: &'a str,
    pub entry: &'a ScopeEntry,
    pub options: &'a SearchOptions,
}

/// Searches a single root. Implemented by [`RipgrepEngine`]; tests plug in
/// scripted engines.
pub trait SearchEngine: Send + Sync {
    fn search_root<'a>(
        &'a self,
        query: RootQuery<'a>,
    ) -> BoxFuture<'a, Result<Vec<SearchMatch>, SearchError>>;
}

/// Runs the `rg` binary as a child process.
#[derive(Debug, Clone)]
pub struct RipgrepEngine {
    binary: PathBuf,
    timeout: Duration,
    max_output_bytes: usize,
}

impl Default for RipgrepEngine {
    fn default() -> Self {
        Self::new("rg")
    }
}

impl RipgrepEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: DEFAULT_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    /// Command-line arguments for one invocation.
    pub fn build_args(keyword: &str, root: &Path, options: &SearchOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--json".into(),
            format!("--context={}", options.context_lines).into(),
            format!("--max-count={}", MAX_MATCHES_PER_FILE).into(),
            "--no-heading".into(),
            "--smart-case".into(),
        ];

        for glob in EXCLUDE_GLOBS {
            args.push(format!("--glob=!{}", glob).into());
        }

        if let Some(ref pattern) = options.file_pattern {
            args.push(format!("--glob={}", pattern).into());
        }

        // `--` keeps keywords starting with a dash from being read as flags
        args.push("--".into());
        args.push(keyword.into());
        args.push(root.as_os_str().to_owned());
        args
    }

    async fn run(&self, query: RootQuery<'_>) -> Result<Vec<SearchMatch>, SearchError> {
        let args = Self::build_args(query.keyword, &query.entry.root, query.options);

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SearchError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            let _ = BufReader::new(stderr).read_to_string(&mut buf).await;
            buf
        });

        let mut assembler = MatchAssembler::new(&query.entry.name, &query.entry.root);
        let max_output_bytes = self.max_output_bytes;

        let collect = async {
            let mut lines = BufReader::new(stdout).lines();
            let mut total = 0usize;
            while let Some(line) = lines.next_line().await? {
                total += line.len() + 1;
                if total > max_output_bytes {
                    return Err(SearchError::OutputTooLarge(max_output_bytes));
                }
                assembler.push_line(&line);
            }
            Ok::<_, SearchError>(child.wait().await?)
        };
        let outcome = tokio::time::timeout(self.timeout, collect).await;

        let status = match outcome {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                let _ = child.kill().await;
                return Err(e);
            }
            Err(_) => {
                let _ = child.kill().await;
                return Err(SearchError::Timeout(self.timeout));
            }
        };

        let stderr = stderr_task.await.unwrap_or_default();

        match status.code() {
            Some(0) => {
                let matches = assembler.finish();
                debug!(
                    project = %query.entry.name,
                    matches = matches.len(),
                    "ripgrep finished"
                );
                Ok(matches)
            }
            Some(EXIT_NO_MATCHES) => Ok(Vec::new()),
            code => Err(SearchError::Failed {
                code,
                stderr: stderr.trim().to_string(),
            }),
        }
    }
}

impl SearchEngine for RipgrepEngine {
    fn search_root<'a>(
        &'a self,
        query: RootQuery<'a>,
    ) -> BoxFuture<'a, Result<Vec<SearchMatch>, SearchError>> {
        Box::pin(self.run(query))
    }
}
