//! Multi-project search: one engine invocation per scope entry, in order.

use tracing::{info, warn};

use super::engine::{RootQuery, SearchEngine};
use super::error::SearchError;
use super::models::{ScopeFailure, SearchOptions, SearchReport};
use crate::projects::ScopeEntry;

/// Search `keyword` across every entry of `scope`.
///
/// Entries are searched sequentially and the search stops issuing new
/// invocations once `max_results` matches have been collected; the result is
/// then truncated to exactly `max_results`. A failing entry is recorded in
/// the report and contributes nothing. Only an invalid `file_pattern` fails
/// the whole call.
pub async fn search<E>(
    engine: &E,
    keyword: &str,
    scope: &[ScopeEntry],
    options: &SearchOptions,
) -> Result<SearchReport, SearchError>
where
    E: SearchEngine + ?Sized,
{
    if let Some(ref pattern) = options.file_pattern {
        glob::Pattern::new(pattern).map_err(|e| SearchError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
    }

    let mut report = SearchReport::default();
    if options.max_results == 0 {
        return Ok(report);
    }

    for entry in scope {
        let query = RootQuery {
            keyword,
            entry,
            options,
        };

        match engine.search_root(query).await {
            Ok(matches) => report.matches.extend(matches),
            Err(error) => {
                warn!(project = %entry.name, error = %error, "search failed for project");
                report.failures.push(ScopeFailure {
                    project: entry.name.clone(),
                    error,
                });
            }
        }

        if report.matches.len() >= options.max_results {
            break;
        }
    }

    report.matches.truncate(options.max_results);

    info!(
        keyword,
        projects = scope.len(),
        matches = report.matches.len(),
        failures = report.failures.len(),
        "search complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::models::SearchMatch;
    use futures::future::BoxFuture;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    enum Script {
        Matches(usize),
        Fail,
        Timeout,
    }

    /// Engine returning canned results per project and recording call order.
    struct ScriptedEngine {
        scripts: HashMap<String, Script>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedEngine {
        fn new(scripts: Vec<(&str, Script)>) -> Self {
            Self {
                scripts: scripts
                    .into_iter()
                    .map(|(name, s)| (name.to_string(), s))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SearchEngine for ScriptedEngine {
        fn search_root<'a>(
            &'a self,
            query: RootQuery<'a>,
        ) -> BoxFuture<'a, Result<Vec<SearchMatch>, SearchError>> {
            Box::pin(async move {
                let name = query.entry.name.clone();
                self.calls.lock().unwrap().push(name.clone());
                match self.scripts.get(&name) {
                    Some(Script::Matches(n)) => Ok((1..=*n as u64)
                        .map(|line| SearchMatch {
                            project: name.clone(),
                            file: "f.rs".to_string(),
                            line,
                            content: query.keyword.to_string(),
                            context: Vec::new(),
                        })
                        .collect()),
                    Some(Script::Fail) => Err(SearchError::Failed {
                        code: Some(2),
                        stderr: "permission denied".to_string(),
                    }),
                    Some(Script::Timeout) => Err(SearchError::Timeout(Duration::from_secs(30))),
                    None => Ok(Vec::new()),
                }
            })
        }
    }

    fn scope(names: &[&str]) -> Vec<ScopeEntry> {
        names
            .iter()
            .map(|n| ScopeEntry::new(*n, format!("/work/{n}")))
            .collect()
    }

    fn options(max_results: usize) -> SearchOptions {
        SearchOptions {
            max_results,
            ..SearchOptions::default()
        }
    }

    #[tokio::test]
    async fn test_truncates_across_roots() {
        let engine = ScriptedEngine::new(vec![
            ("r1", Script::Matches(40)),
            ("r2", Script::Matches(30)),
            ("r3", Script::Matches(5)),
        ]);

        let report = search(&engine, "needle", &scope(&["r1", "r2", "r3"]), &options(50))
            .await
            .unwrap();

        assert_eq!(report.matches.len(), 50);
        assert!(report.matches[..40].iter().all(|m| m.project == "r1"));
        assert!(report.matches[40..].iter().all(|m| m.project == "r2"));
        let r2_lines: Vec<u64> = report.matches[40..].iter().map(|m| m.line).collect();
        assert_eq!(r2_lines, (1..=10).collect::<Vec<_>>());
        // Cap reached after r2, so r3 is never invoked
        assert_eq!(engine.calls(), ["r1", "r2"]);
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_remaining_roots() {
        let engine = ScriptedEngine::new(vec![
            ("broken", Script::Fail),
            ("slow", Script::Timeout),
            ("ok", Script::Matches(3)),
        ]);

        let report = search(&engine, "needle", &scope(&["broken", "slow", "ok"]), &options(50))
            .await
            .unwrap();

        assert_eq!(report.matches.len(), 3);
        assert!(report.matches.iter().all(|m| m.project == "ok"));
        let failed: Vec<&str> = report.failures.iter().map(|f| f.project.as_str()).collect();
        assert_eq!(failed, ["broken", "slow"]);
        assert!(matches!(report.failures[1].error, SearchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_roots_searched_in_scope_order() {
        let engine = ScriptedEngine::new(vec![("b", Script::Matches(1)), ("a", Script::Matches(1))]);

        let report = search(&engine, "x", &scope(&["b", "c", "a"]), &options(50))
            .await
            .unwrap();

        assert_eq!(engine.calls(), ["b", "c", "a"]);
        let projects: Vec<&str> = report.matches.iter().map(|m| m.project.as_str()).collect();
        assert_eq!(projects, ["b", "a"]);
    }

    #[tokio::test]
    async fn test_invalid_file_pattern_fails_whole_call() {
        let engine = ScriptedEngine::new(vec![("a", Script::Matches(1))]);
        let options = SearchOptions {
            file_pattern: Some("src/***.rs".to_string()),
            ..SearchOptions::default()
        };

        let err = search(&engine, "x", &scope(&["a"]), &options).await.unwrap_err();

        assert!(matches!(err, SearchError::InvalidPattern { .. }));
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_cap_skips_engine() {
        let engine = ScriptedEngine::new(vec![("a", Script::Matches(3))]);

        let report = search(&engine, "x", &scope(&["a"]), &options(0)).await.unwrap();

        assert!(report.is_empty());
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_with_ripgrep() {
        use crate::projects::ProjectStore;
        use crate::search::RipgrepEngine;

        let rg_available = std::process::Command::new("rg")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !rg_available {
            eprintln!("rg not installed, skipping");
            return;
        }

        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("svc");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(
            root.join("a.ts"),
            "line1\nline2\nline3\nconst before = 4;\nconst needle = 5;\nconst after = 6;\nline7\n",
        )
        .unwrap();

        let store = ProjectStore::new(tmp.path().join("data"));
        store.register("svc", &root, "").unwrap();
        let scope = store.scope(Some("svc")).unwrap();

        let options = SearchOptions {
            context_lines: 1,
            ..SearchOptions::default()
        };
        let report = search(&RipgrepEngine::default(), "needle", &scope, &options)
            .await
            .unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(
            report.matches,
            vec![SearchMatch {
                project: "svc".to_string(),
                file: "a.ts".to_string(),
                line: 5,
                content: "const needle = 5;".to_string(),
                context: vec![
                    "const before = 4;".to_string(),
                    "const after = 6;".to_string()
                ],
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_scope() {
        let engine = ScriptedEngine::new(vec![]);
        let report = search(&engine, "x", &[], &options(50)).await.unwrap();
        assert!(report.is_empty());
        assert!(report.failures.is_empty());
    }
}
