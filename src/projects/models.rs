//! Data models for the project registry.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered project: a named directory treated as a search root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier within the registry.
    pub name: String,

    /// Absolute filesystem root. Only checked at registration time.
    pub path: PathBuf,

    #[serde(default)]
    pub description: String,

    pub added_at: DateTime<Utc>,
}

impl Project {
    pub fn scope_entry(&self) -> ScopeEntry {
        ScopeEntry::new(self.name.clone(), &self.path)
    }
}

/// The on-disk registry document.
///
/// Projects are kept in insertion order; search scopes inherit this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl RegistryDocument {
    pub fn find(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

/// One `(project name, root path)` pair a search runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub name: String,
    pub root: PathBuf,
}

impl ScopeEntry {
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_uses_camel_case_on_disk() {
        let doc = RegistryDocument {
            projects: vec![Project {
                name: "svc".to_string(),
                path: PathBuf::from("/tmp/svc"),
                description: "payments".to_string(),
                added_at: "2024-05-01T10:00:00Z".parse().unwrap(),
            }],
        };

        let json = serde_json::to_value(&doc).unwrap();
        let project = &json["projects"][0];
        assert_eq!(project["name"], "svc");
        assert_eq!(project["path"], "/tmp/svc");
        assert_eq!(project["description"], "payments");
        assert!(project.get("addedAt").is_some());
        assert!(project.get("added_at").is_none());
    }

    #[test]
    fn test_reads_document_written_by_other_clients() {
        let raw = r#"{
          "projects": [
            {
              "name": "web",
              "path": "/work/web",
              "description": "",
              "addedAt": "2025-01-02T03:04:05.678Z"
            }
          ]
        }"#;

        let doc: RegistryDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.projects.len(), 1);
        assert!(doc.contains("web"));
        assert_eq!(doc.find("web").unwrap().path, PathBuf::from("/work/web"));
    }
}
