//! Durable JSON store for registered projects.
//!
//! The registry is a single document at `<data dir>/projects.json`:
//! ```text
//! { "projects": [ { "name", "path", "description", "addedAt" }, ... ] }
//! ```
//!
//! Nothing is cached between calls. Reads re-parse the file; mutations hold an
//! exclusive lock on `projects.json.lock` while they re-read, modify and
//! atomically replace the document.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::error::{Result, StoreError};
use super::models::{Project, RegistryDocument, ScopeEntry};

const REGISTRY_FILE: &str = "projects.json";
const LOCK_FILE: &str = "projects.json.lock";

/// Outcome of a mutation closure: whether the document must be rewritten.
enum Mutation<T> {
    Write(T),
    Unchanged(T),
}

/// Held for the duration of a read-modify-write cycle.
struct RegistryLock {
    file: File,
}

impl Drop for RegistryLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// File-backed project registry.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    dir: PathBuf,
}

impl ProjectStore {
    /// Create a store rooted at the given data directory.
    ///
    /// The directory is not touched until the first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: data_dir.into(),
        }
    }

    /// Path of the registry document.
    pub fn document_path(&self) -> PathBuf {
        self.dir.join(REGISTRY_FILE)
    }

    /// All projects in insertion order.
    pub fn list(&self) -> Result<Vec<Project>> {
        Ok(self.load()?.projects)
    }

    /// Exact-match lookup by name.
    pub fn get(&self, name: &str) -> Result<Option<Project>> {
        Ok(self.load()?.find(name).cloned())
    }

    /// Append a new project stamped with the current time.
    ///
    /// Fails with [`StoreError::DuplicateName`] if the name is taken, leaving
    /// the document untouched.
    pub fn add(&self, name: &str, path: impl AsRef<Path>, description: &str) -> Result<Project> {
        let project = self.update(|doc| {
            if doc.contains(name) {
                return Err(StoreError::DuplicateName(name.to_string()));
            }

            let project = Project {
                name: name.to_string(),
                path: path.as_ref().to_path_buf(),
                description: description.to_string(),
                added_at: chrono::Utc::now(),
            };
            doc.projects.push(project.clone());
            Ok(Mutation::Write(project))
        })?;

        info!(name = %project.name, path = %project.path.display(), "project added");
        Ok(project)
    }

    /// Remove the first project with the given name.
    ///
    /// Returns `false` when no such project exists; that is not an error.
    pub fn remove(&self, name: &str) -> Result<bool> {
        if !self.document_path().exists() {
            return Ok(false);
        }

        let removed = self.update(|doc| {
            match doc.projects.iter().position(|p| p.name == name) {
                Some(index) => {
                    doc.projects.remove(index);
                    Ok(Mutation::Write(true))
                }
                None => Ok(Mutation::Unchanged(false)),
            }
        })?;

        if removed {
            info!(name, "project removed");
        }
        Ok(removed)
    }

    /// Validate a directory and register it under `name`.
    ///
    /// The path must exist and be a directory; it is stored canonicalized.
    pub fn register(&self, name: &str, path: impl AsRef<Path>, description: &str) -> Result<Project> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(StoreError::NotADirectory(path.to_path_buf()));
        }

        let root = std::fs::canonicalize(path)?;
        self.add(name, root, description)
    }

    /// Resolve the roots a search runs against.
    ///
    /// With a project name this is that single project (or
    /// [`StoreError::NotFound`]); otherwise every project in registry order.
    pub fn scope(&self, project: Option<&str>) -> Result<Vec<ScopeEntry>> {
        let doc = self.load()?;
        match project {
            Some(name) => doc
                .find(name)
                .map(|p| vec![p.scope_entry()])
                .ok_or_else(|| StoreError::NotFound(name.to_string())),
            None => Ok(doc.projects.iter().map(Project::scope_entry).collect()),
        }
    }

    fn load(&self) -> Result<RegistryDocument> {
        let path = self.document_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RegistryDocument::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Run a read-modify-write cycle under the registry lock.
    fn update<T>(
        &self,
        mutate: impl FnOnce(&mut RegistryDocument) -> Result<Mutation<T>>,
    ) -> Result<T> {
        let _lock = self.lock()?;
        let mut doc = self.load()?;

        match mutate(&mut doc)? {
            Mutation::Write(value) => {
                self.save(&doc)?;
                Ok(value)
            }
            Mutation::Unchanged(value) => Ok(value),
        }
    }

    fn lock(&self) -> Result<RegistryLock> {
        std::fs::create_dir_all(&self.dir)?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;

        Ok(RegistryLock { file })
    }

    fn save(&self, doc: &RegistryDocument) -> Result<()> {
        let path = self.document_path();
        let bytes = serde_json::to_vec_pretty(doc).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %path.display(), projects = doc.projects.len(), "registry saved");
        Ok(())
    }
}
