//! Bounded reads of files inside registered projects.

use std::path::{Path, PathBuf};

use super::BrowseError;
use crate::projects::Project;

/// Largest file `read_project_file` will return.
pub const MAX_FILE_SIZE: u64 = 100 * 1024;

#[derive(Debug)]
pub struct FileContent {
    pub path: PathBuf,
    pub content: String,
}

/// Read a file, provided it resolves to a location inside one of `projects`.
///
/// Symlinks are resolved before the containment check.
pub fn read_project_file(projects: &[Project], path: &Path) -> Result<FileContent, BrowseError> {
    let resolved = match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BrowseError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let allowed = projects.iter().any(|p| {
        let root = std::fs::canonicalize(&p.path).unwrap_or_else(|_| p.path.clone());
        resolved.starts_with(root)
    });
    if !allowed {
        return Err(BrowseError::OutsideProjects(resolved));
    }

    let size = std::fs::metadata(&resolved)?.len();
    if size > MAX_FILE_SIZE {
        return Err(BrowseError::TooLarge {
            path: resolved,
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(&resolved)?;
    Ok(FileContent {
        path: resolved,
        content,
    })
}
