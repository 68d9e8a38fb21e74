//! Reassembles ripgrep's `--json` event stream into match records.
//!
//! ripgrep emits one JSON object per line, tagged `begin`, `match`,
//! `context`, `end` or `summary`. Only `match` and `context` matter here.
//! Context lines belonging to a match are only complete once the next match
//! (or the end of the stream) arrives, so records are emitted one step late.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::models::SearchMatch;

#[derive(Debug, Deserialize)]
struct RgMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RgLineData {
    path: RgText,
    lines: RgText,
    #[serde(default)]
    line_number: Option<u64>,
}

/// ripgrep reports non-UTF-8 data as `{"bytes": ...}` instead of `{"text": ...}`.
#[derive(Debug, Deserialize)]
struct RgText {
    #[serde(default)]
    text: Option<String>,
}

/// A decoded event that affects match reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RgEvent {
    Match { path: String, line: u64, text: String },
    Context { text: String },
}

impl RgEvent {
    /// Decode one output line. Returns `None` for lines that are not JSON,
    /// carry another tag, or hold non-UTF-8 text.
    pub fn parse(line: &str) -> Option<Self> {
        let message: RgMessage = serde_json::from_str(line).ok()?;

        match message.kind.as_str() {
            "match" => {
                let data: RgLineData = serde_json::from_value(message.data).ok()?;
                Some(RgEvent::Match {
                    path: data.path.text?,
                    line: data.line_number?,
                    text: data.lines.text?,
                })
            }
            "context" => {
                let data: RgLineData = serde_json::from_value(message.data).ok()?;
                Some(RgEvent::Context {
                    text: data.lines.text?,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PendingMatch {
    file: String,
    line: u64,
    content: String,
}

/// Streaming state machine turning events from one invocation into
/// [`SearchMatch`] records.
#[derive(Debug)]
pub struct MatchAssembler {
    project: String,
    root: PathBuf,
    pending: Option<PendingMatch>,
    context: Vec<String>,
    matches: Vec<SearchMatch>,
}

impl MatchAssembler {
    pub fn new(project: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            root: root.into(),
            pending: None,
            context: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Feed one raw output line. Malformed lines are skipped.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if let Some(event) = RgEvent::parse(line) {
            self.push_event(event);
        }
    }

    pub fn push_event(&mut self, event: RgEvent) {
        match event {
            RgEvent::Match { path, line, text } => {
                self.flush();
                self.pending = Some(PendingMatch {
                    file: relative_path(&self.root, &path),
                    line,
                    content: text.trim_end().to_string(),
                });
            }
            RgEvent::Context { text } => {
                self.context.push(text.trim_end().to_string());
            }
        }
    }

    /// Flush the in-progress match and return every record in emission order.
    pub fn finish(mut self) -> Vec<SearchMatch> {
        self.flush();
        self.matches
    }

    fn flush(&mut self) {
        // Context buffered before the first match stays with that match.
        let Some(pending) = self.pending.take() else {
            return;
        };

        self.matches.push(SearchMatch {
            project: self.project.clone(),
            file: pending.file,
            line: pending.line,
            content: pending.content,
            context: std::mem::take(&mut self.context),
        });
    }
}

fn relative_path(root: &Path, path: &str) -> String {
    Path::new(path)
        .strip_prefix(root)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_output(project: &str, root: &Path, output: &str) -> Vec<SearchMatch> {
        let mut assembler = MatchAssembler::new(project, root);
        for line in output.lines() {
            assembler.push_line(line);
        }
        assembler.finish()
    }

    fn match_line(path: &str, line: u64, text: &str) -> String {
        json!({
            "type": "match",
            "data": {
                "path": { "text": path },
                "lines": { "text": format!("{text}\n") },
                "line_number": line,
                "absolute_offset": 0,
                "submatches": []
            }
        })
        .to_string()
    }

    fn context_line(path: &str, line: u64, text: &str) -> String {
        json!({
            "type": "context",
            "data": {
                "path": { "text": path },
                "lines": { "text": format!("{text}\n") },
                "line_number": line,
                "absolute_offset": 0,
                "submatches": []
            }
        })
        .to_string()
    }

    fn begin_line(path: &str) -> String {
        json!({ "type": "begin", "data": { "path": { "text": path } } }).to_string()
    }

    #[test]
    fn test_n_matches_with_context_between() {
        let output = [
            begin_line("/repo/a.rs"),
            match_line("/repo/a.rs", 3, "let needle = 1;"),
            context_line("/repo/a.rs", 4, "one"),
            context_line("/repo/a.rs", 5, "two"),
            match_line("/repo/a.rs", 6, "needle()"),
            match_line("/repo/a.rs", 7, "needle again"),
            context_line("/repo/a.rs", 8, "three"),
        ]
        .join("\n");

        let matches = parse_output("repo", Path::new("/repo"), &output);

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].line, 3);
        assert_eq!(matches[0].context, vec!["one", "two"]);
        assert_eq!(matches[1].line, 6);
        assert!(matches[1].context.is_empty());
        assert_eq!(matches[2].line, 7);
        assert_eq!(matches[2].context, vec!["three"]);
        assert!(matches.iter().all(|m| m.project == "repo" && m.file == "a.rs"));
    }

    #[test]
    fn test_lone_match_keeps_leading_and_trailing_context() {
        let output = [
            context_line("/tmp/svc/a.ts", 4, "before"),
            match_line("/tmp/svc/a.ts", 5, "const needle = true;   "),
            context_line("/tmp/svc/a.ts", 6, "after  "),
        ]
        .join("\n");

        let matches = parse_output("svc", Path::new("/tmp/svc"), &output);

        assert_eq!(
            matches,
            vec![SearchMatch {
                project: "svc".to_string(),
                file: "a.ts".to_string(),
                line: 5,
                content: "const needle = true;".to_string(),
                context: vec!["before".to_string(), "after".to_string()],
            }]
        );
    }

    #[test]
    fn test_context_runs_into_next_file() {
        let output = [
            match_line("/r/src/one.py", 1, "needle"),
            context_line("/r/src/one.py", 2, "tail of one"),
            context_line("/r/src/two.py", 9, "head of two"),
            match_line("/r/src/two.py", 10, "needle"),
        ]
        .join("\n");

        let matches = parse_output("r", Path::new("/r"), &output);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].file, "src/one.py");
        assert_eq!(matches[0].context, vec!["tail of one", "head of two"]);
        assert_eq!(matches[1].file, "src/two.py");
        assert!(matches[1].context.is_empty());
    }

    #[test]
    fn test_malformed_and_unknown_lines_are_skipped() {
        let output = [
            "not json at all".to_string(),
            begin_line("/r/a.go"),
            match_line("/r/a.go", 2, "needle"),
            "{\"type\": \"match\", \"data\": 42}".to_string(),
            "{\"type\": \"match\"".to_string(),
            context_line("/r/a.go", 3, "ctx"),
            json!({ "type": "end", "data": { "path": { "text": "/r/a.go" } } }).to_string(),
            json!({ "type": "summary", "data": { "elapsed_total": { "human": "0.01s" } } })
                .to_string(),
            String::new(),
        ]
        .join("\n");

        let matches = parse_output("r", Path::new("/r"), &output);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 2);
        assert_eq!(matches[0].context, vec!["ctx"]);
    }

    #[test]
    fn test_non_utf8_text_is_skipped() {
        let bytes_match = json!({
            "type": "match",
            "data": {
                "path": { "text": "/r/bin.dat" },
                "lines": { "bytes": "/w==" },
                "line_number": 1
            }
        })
        .to_string();

        assert_eq!(RgEvent::parse(&bytes_match), None);
        assert!(parse_output("r", Path::new("/r"), &bytes_match).is_empty());
    }

    #[test]
    fn test_path_outside_root_is_kept_verbatim() {
        let output = match_line("elsewhere/x.rs", 1, "needle");
        let matches = parse_output("r", Path::new("/r"), &output);
        assert_eq!(matches[0].file, "elsewhere/x.rs");
    }

    #[test]
    fn test_push_event_directly() {
        let mut assembler = MatchAssembler::new("r", "/r");
        assembler.push_event(RgEvent::Match {
            path: "/r/a".to_string(),
            line: 1,
            text: "x".to_string(),
        });
        assembler.push_event(RgEvent::Context {
            text: "y\r\n".to_string(),
        });
        let matches = assembler.finish();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].context, vec!["y"]);
    }

    #[test]
    fn test_empty_stream() {
        assert!(parse_output("r", Path::new("/r"), "").is_empty());
        assert!(MatchAssembler::new("r", "/r").finish().is_empty());
    }
}
