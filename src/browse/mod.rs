//! Browsing helpers that work directly on a project's root directory.

mod read;
mod tree;

use std::path::PathBuf;

use thiserror::Error;

pub use read::read_project_file;
pub use tree::{DEFAULT_TREE_DEPTH, build_tree, count_files, render_tree};

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("file is outside every registered project: {}", .0.display())]
    OutsideProjects(PathBuf),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file is {size} bytes, over the {limit} byte limit: {}", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
