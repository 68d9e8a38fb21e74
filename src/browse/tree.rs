//! Directory tree listing and file counting for project roots.

use std::path::Path;

/// Directories never listed or counted.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    ".next",
    "coverage",
    "__pycache__",
    ".turbo",
    ".cache",
    ".idea",
    ".vscode",
];

/// OS clutter files never listed or counted.
const SKIP_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

pub const DEFAULT_TREE_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File { name: String },
    Dir { name: String, children: Vec<TreeNode> },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name } | TreeNode::Dir { name, .. } => name,
        }
    }
}

fn is_skipped(name: &str) -> bool {
    SKIP_DIRS.contains(&name) || SKIP_FILES.contains(&name)
}

/// Build the tree under `dir`, at most `max_depth` levels deep.
///
/// Directories come first, then files, each sorted by name. Unreadable
/// directories are shown empty.
pub fn build_tree(dir: &Path, max_depth: usize) -> Vec<TreeNode> {
    build_level(dir, max_depth, 0)
}

fn build_level(dir: &Path, max_depth: usize, depth: usize) -> Vec<TreeNode> {
    if depth >= max_depth {
        return Vec::new();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_skipped(&name) {
            continue;
        }

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            let children = build_level(&entry.path(), max_depth, depth + 1);
            dirs.push(TreeNode::Dir { name, children });
        } else {
            files.push(TreeNode::File { name });
        }
    }

    dirs.sort_by(|a, b| a.name().cmp(b.name()));
    files.sort_by(|a, b| a.name().cmp(b.name()));
    dirs.extend(files);
    dirs
}

/// Render nodes with box-drawing connectors.
pub fn render_tree(nodes: &[TreeNode]) -> String {
    let mut output = String::new();
    render_level(nodes, "", &mut output);
    output
}

fn render_level(nodes: &[TreeNode], prefix: &str, output: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{}{}{}\n", prefix, connector, node.name()));

        if let TreeNode::Dir { children, .. } = node {
            let child_prefix = if is_last { "    " } else { "│   " };
            render_level(children, &format!("{}{}", prefix, child_prefix), output);
        }
    }
}

/// Count files under `dir`, skipping the same directories as the tree.
pub fn count_files(dir: &Path) -> u64 {
    let mut count = 0;
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            if is_skipped(&name.to_string_lossy()) {
                continue;
            }
            match entry.file_type() {
                Ok(t) if t.is_dir() => count += count_files(&entry.path()),
                Ok(_) => count += 1,
                Err(_) => {}
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/util")).unwrap();
        fs::write(root.join("src/main.rs"), "").unwrap();
        fs::write(root.join("src/util/mod.rs"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();
        fs::create_dir_all(root.join("node_modules/left-pad")).unwrap();
        fs::write(root.join("node_modules/left-pad/index.js"), "").unwrap();
        fs::write(root.join(".DS_Store"), "").unwrap();
        tmp
    }

    #[test]
    fn test_tree_orders_dirs_first_and_skips_junk() {
        let tmp = fixture();
        let tree = build_tree(tmp.path(), DEFAULT_TREE_DEPTH);

        let names: Vec<&str> = tree.iter().map(|n| n.name()).collect();
        assert_eq!(names, ["src", "Cargo.toml", "README.md"]);

        let rendered = render_tree(&tree);
        let expected = "\
├── src
│   ├── util
│   │   └── mod.rs
│   └── main.rs
├── Cargo.toml
└── README.md
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_depth_limit() {
        let tmp = fixture();
        let tree = build_tree(tmp.path(), 1);

        match &tree[0] {
            TreeNode::Dir { name, children } => {
                assert_eq!(name, "src");
                assert!(children.is_empty());
            }
            other => panic!("expected dir, got {other:?}"),
        }
        assert!(build_tree(tmp.path(), 0).is_empty());
    }

    #[test]
    fn test_count_files() {
        let tmp = fixture();
        assert_eq!(count_files(tmp.path()), 4);
        assert_eq!(count_files(&tmp.path().join("missing")), 0);
    }
}
