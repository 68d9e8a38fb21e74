//! Search data models.

use serde::Serialize;

use super::error::SearchError;

/// Default cap on the number of matches returned by one search.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Default number of context lines around each match.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// One located occurrence of the keyword plus its surrounding lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub project: String,
    /// Path relative to the project root.
    pub file: String,
    /// 1-based line number.
    pub line: u64,
    /// The matching line, trailing whitespace stripped.
    pub content: String,
    /// Context lines in emission order, trailing whitespace stripped.
    pub context: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Extra inclusion glob, e.g. `*.ts`.
    pub file_pattern: Option<String>,
    pub max_results: usize,
    pub context_lines: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            file_pattern: None,
            max_results: DEFAULT_MAX_RESULTS,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// A scope entry whose invocation failed and contributed nothing.
#[derive(Debug)]
pub struct ScopeFailure {
    pub project: String,
    pub error: SearchError,
}

/// Result of a multi-project search: the (truncated) matches plus the
/// projects that could not be searched.
#[derive(Debug, Default)]
pub struct SearchReport {
    pub matches: Vec<SearchMatch>,
    pub failures: Vec<ScopeFailure>,
}

impl SearchReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
