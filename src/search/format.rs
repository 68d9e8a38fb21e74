//! Plain-text rendering of search results grouped by project.

use super::models::SearchMatch;

/// Matches sharing a project, in emission order.
#[derive(Debug)]
pub struct ProjectGroup<'a> {
    pub project: &'a str,
    pub matches: Vec<&'a SearchMatch>,
}

/// Group matches by project, keeping first-seen project order.
///
/// Presentation only: nothing is reordered within a group or deduplicated.
pub fn group_by_project(matches: &[SearchMatch]) -> Vec<ProjectGroup<'_>> {
    let mut groups: Vec<ProjectGroup<'_>> = Vec::new();

    for m in matches {
        match groups.iter().position(|g| g.project == m.project) {
            Some(i) => groups[i].matches.push(m),
            None => groups.push(ProjectGroup {
                project: &m.project,
                matches: vec![m],
            }),
        }
    }

    groups
}

/// Render matches as:
///
/// ```text
/// [project]
///   path/to/file.rs:12
///      matching line
///      context line
///
/// ```
pub fn format_grouped(matches: &[SearchMatch]) -> String {
    let mut output = String::new();

    for group in group_by_project(matches) {
        output.push_str(&format!("[{}]\n", group.project));
        for m in group.matches {
            output.push_str(&format!("  {}:{}\n", m.file, m.line));
            output.push_str(&format!("     {}\n", m.content));
            for line in &m.context {
                output.push_str(&format!("     {}\n", line));
            }
            output.push('\n');
        }
    }

    output
}
