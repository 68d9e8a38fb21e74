//! Tool handlers shared by the MCP server and the CLI.
//!
//! Each handler takes already-decoded arguments and returns a [`ToolOutcome`]:
//! display text flagged as success or failure. Failures are always distinct
//! from empty results ("project not found" vs "no matches").

pub mod mcp;

use std::path::Path;

use tracing::warn;

use crate::browse::{self, BrowseError};
use crate::projects::{ProjectStore, StoreError};
use crate::search::{self, SearchEngine, SearchOptions, SearchReport, format_grouped};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Success(String),
    Failure(String),
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ToolOutcome::Success(text) | ToolOutcome::Failure(text) => text,
        }
    }
}

/// Arguments of `search_code`.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub keyword: String,
    pub project: Option<String>,
    pub file_pattern: Option<String>,
    pub max_results: Option<usize>,
    pub context_lines: Option<usize>,
}

/// The registry, a search engine and default search limits.
pub struct Toolbox<E> {
    store: ProjectStore,
    engine: E,
    defaults: SearchOptions,
}

impl<E: SearchEngine> Toolbox<E> {
    pub fn new(store: ProjectStore, engine: E, defaults: SearchOptions) -> Self {
        Self {
            store,
            engine,
            defaults,
        }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn add_project(&self, path: &str, name: &str, description: Option<&str>) -> ToolOutcome {
        let name = name.trim();
        if name.is_empty() {
            return ToolOutcome::Failure("Project name must not be empty.".to_string());
        }

        let description = description.unwrap_or("");
        match self.store.register(name, Path::new(path), description) {
            Ok(project) => {
                let file_count = browse::count_files(&project.path);
                ToolOutcome::Success(format!(
                    "Registered project '{}'.\nPath: {}\nDescription: {}\nFiles: {}",
                    project.name,
                    project.path.display(),
                    display_description(&project.description),
                    file_count
                ))
            }
            Err(StoreError::PathNotFound(p)) => {
                ToolOutcome::Failure(format!("Path not found: {}", p.display()))
            }
            Err(StoreError::NotADirectory(p)) => {
                ToolOutcome::Failure(format!("Path is not a directory: {}", p.display()))
            }
            Err(e @ StoreError::DuplicateName(_)) => ToolOutcome::Failure(capitalize(&e.to_string())),
            Err(e) => ToolOutcome::Failure(format!("Failed to register project: {}", e)),
        }
    }

    pub fn remove_project(&self, name: &str) -> ToolOutcome {
        match self.store.remove(name) {
            Ok(true) => ToolOutcome::Success(format!("Removed project '{}'.", name)),
            Ok(false) => ToolOutcome::Failure(format!("Project '{}' not found.", name)),
            Err(e) => ToolOutcome::Failure(format!("Failed to remove project: {}", e)),
        }
    }

    pub fn list_projects(&self) -> ToolOutcome {
        let projects = match self.store.list() {
            Ok(projects) => projects,
            Err(e) => return ToolOutcome::Failure(format!("Failed to list projects: {}", e)),
        };

        if projects.is_empty() {
            return ToolOutcome::Success(
                "No projects registered. Use add_project to register one.".to_string(),
            );
        }

        let entries: Vec<String> = projects
            .iter()
            .map(|p| {
                format!(
                    "- {}\n  Path: {}\n  Description: {}\n  Files: {}",
                    p.name,
                    p.path.display(),
                    display_description(&p.description),
                    browse::count_files(&p.path)
                )
            })
            .collect();

        ToolOutcome::Success(format!(
            "Registered projects ({}):\n\n{}",
            projects.len(),
            entries.join("\n\n")
        ))
    }

    pub async fn search_code(&self, request: &SearchRequest) -> ToolOutcome {
        let keyword = request.keyword.as_str();
        if keyword.is_empty() {
            return ToolOutcome::Failure("Keyword must not be empty.".to_string());
        }

        let scope = match self.store.scope(request.project.as_deref()) {
            Ok(scope) => scope,
            Err(StoreError::NotFound(name)) => {
                return ToolOutcome::Failure(format!(
                    "Project '{}' not found. Use list_projects to see registered projects.",
                    name
                ));
            }
            Err(e) => return ToolOutcome::Failure(format!("Failed to load projects: {}", e)),
        };

        if scope.is_empty() {
            return ToolOutcome::Success(
                "No projects registered. Use add_project to register one first.".to_string(),
            );
        }

        let options = SearchOptions {
            file_pattern: request.file_pattern.clone(),
            max_results: request.max_results.unwrap_or(self.defaults.max_results),
            context_lines: request.context_lines.unwrap_or(self.defaults.context_lines),
        };

        let report = match search::search(&self.engine, keyword, &scope, &options).await {
            Ok(report) => report,
            Err(e) => return ToolOutcome::Failure(format!("Search failed: {}", e)),
        };

        ToolOutcome::Success(render_report(keyword, request.project.as_deref(), &report))
    }

    pub fn get_file_tree(&self, project: &str, depth: Option<usize>) -> ToolOutcome {
        let project = match self.store.get(project) {
            Ok(Some(p)) => p,
            Ok(None) => return ToolOutcome::Failure(format!("Project '{}' not found.", project)),
            Err(e) => return ToolOutcome::Failure(format!("Failed to load projects: {}", e)),
        };

        let depth = depth.unwrap_or(browse::DEFAULT_TREE_DEPTH);
        let tree = browse::build_tree(&project.path, depth);

        ToolOutcome::Success(format!(
            "{} ({})\n\n{}",
            project.name,
            project.path.display(),
            browse::render_tree(&tree)
        ))
    }

    pub fn read_file(&self, path: &str) -> ToolOutcome {
        let projects = match self.store.list() {
            Ok(projects) => projects,
            Err(e) => return ToolOutcome::Failure(format!("Failed to load projects: {}", e)),
        };

        match browse::read_project_file(&projects, Path::new(path)) {
            Ok(file) => ToolOutcome::Success(format!(
                "{}\n\n```\n{}\n```",
                file.path.display(),
                file.content
            )),
            Err(BrowseError::OutsideProjects(p)) => ToolOutcome::Failure(format!(
                "Only files inside registered projects can be read: {}",
                p.display()
            )),
            Err(BrowseError::NotFound(p)) => {
                ToolOutcome::Failure(format!("File not found: {}", p.display()))
            }
            Err(BrowseError::TooLarge { size, limit, .. }) => ToolOutcome::Failure(format!(
                "File is too large ({:.1}KB, limit {}KB).",
                size as f64 / 1024.0,
                limit / 1024
            )),
            Err(e) => ToolOutcome::Failure(format!("Failed to read file: {}", e)),
        }
    }
}

fn render_report(keyword: &str, project: Option<&str>, report: &SearchReport) -> String {
    let mut output = if report.is_empty() {
        match project {
            Some(p) => format!("No matches for '{}' (project: {}).", keyword, p),
            None => format!("No matches for '{}'.", keyword),
        }
    } else {
        format!(
            "Matches for '{}' ({}):\n\n{}",
            keyword,
            report.matches.len(),
            format_grouped(&report.matches)
        )
    };

    if !report.failures.is_empty() {
        let skipped: Vec<String> = report
            .failures
            .iter()
            .map(|f| format!("{} ({})", f.project, f.error))
            .collect();
        warn!(count = skipped.len(), "projects skipped during search");
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&format!("\nSkipped after errors: {}", skipped.join(", ")));
    }

    output
}

fn display_description(description: &str) -> &str {
    if description.is_empty() {
        "(none)"
    } else {
        description
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
