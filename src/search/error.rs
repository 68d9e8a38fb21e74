use std::time::Duration;

use thiserror::Error;

/// Failure of a single ripgrep invocation.
///
/// These never abort a multi-project search; the executor records them
/// per scope entry and moves on.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    #[error("search output exceeded {0} bytes")]
    OutputTooLarge(usize),

    #[error("search exited with code {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
