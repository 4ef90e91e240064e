use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Move,
    Copy,
}

/// Represents a single planned file move or copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOperation {
    pub kind: OperationKind,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Collection of operations for preview
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreviewTree {
    pub directories_to_create: Vec<PathBuf>,
    pub operations: Vec<FileOperation>,
}

impl PreviewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory to be created (once)
    pub fn add_directory(&mut self, path: PathBuf) {
        if !self.directories_to_create.contains(&path) {
            self.directories_to_create.push(path);
        }
    }

    /// Add a file move operation
    pub fn add_move(&mut self, source: PathBuf, destination: PathBuf) {
        self.operations.push(FileOperation {
            kind: OperationKind::Move,
            source,
            destination,
        });
    }

    /// Add a file copy operation
    pub fn add_copy(&mut self, source: PathBuf, destination: PathBuf) {
        self.operations.push(FileOperation {
            kind: OperationKind::Copy,
            source,
            destination,
        });
    }

    /// Check if there are any operations
    pub fn is_empty(&self) -> bool {
        self.directories_to_create.is_empty() && self.operations.is_empty()
    }

    pub fn count(&self, kind: OperationKind) -> usize {
        self.operations.iter().filter(|op| op.kind == kind).count()
    }

    /// One line per operation: `Move notes.txt to Cluster_0`
    pub fn action_lines(&self, base: &Path) -> String {
        let mut output = String::new();
        for op in &self.operations {
            let verb = match op.kind {
                OperationKind::Move => "Move",
                OperationKind::Copy => "Copy",
            };
            let file_name = op
                .source
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            let target = op
                .destination
                .parent()
                .map(|dir| relative_display(dir, base))
                .unwrap_or_default();
            output.push_str(&format!("{} {} to {}\n", verb, file_name, target));
        }
        output
    }

    /// Tree view of the destinations, grouped by folder
    pub fn render(&self, base: &Path) -> String {
        let mut output = String::new();
        output.push_str("Proposed changes:\n");

        let mut dir_files: BTreeMap<PathBuf, Vec<&FileOperation>> = BTreeMap::new();
        for op in &self.operations {
            let dir = op
                .destination
                .parent()
                .unwrap_or(&op.destination)
                .to_path_buf();
            dir_files.entry(dir).or_default().push(op);
        }

        for (dir, files) in &dir_files {
            output.push_str(&format!("📁 {}/\n", relative_display(dir, base)));
            for op in files {
                let file_name = op
                    .destination
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                let source_dir = op
                    .source
                    .parent()
                    .map(|dir| relative_display(dir, base))
                    .unwrap_or_default();
                output.push_str(&format!("  📄 {} (from: {})\n", file_name, source_dir));
            }
        }

        output.push_str(&format!(
            "\nCreate {} directories, move {} files, copy {} files",
            self.directories_to_create.len(),
            self.count(OperationKind::Move),
            self.count(OperationKind::Copy)
        ));

        output
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn relative_display(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_tree_empty() {
        let tree = PreviewTree::new();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_preview_tree_add_operations() {
        let mut tree = PreviewTree::new();
        tree.add_directory(PathBuf::from("/test/folder1"));
        tree.add_directory(PathBuf::from("/test/folder1"));
        tree.add_move(PathBuf::from("/test/file.txt"), PathBuf::from("/test/folder1/file.txt"));
        tree.add_copy(PathBuf::from("/test/a/b.txt"), PathBuf::from("/test/folder1/b.txt"));

        assert!(!tree.is_empty());
        assert_eq!(tree.directories_to_create.len(), 1);
        assert_eq!(tree.count(OperationKind::Move), 1);
        assert_eq!(tree.count(OperationKind::Copy), 1);
    }

    #[test]
    fn test_action_lines() {
        let base = Path::new("/test");
        let mut tree = PreviewTree::new();
        tree.add_move(base.join("a.txt"), base.join("Cluster_0/a.txt"));
        tree.add_move(base.join("b.txt"), base.join("Documents/b.txt"));

        assert_eq!(
            tree.action_lines(base),
            "Move a.txt to Cluster_0\nMove b.txt to Documents\n"
        );
    }

    #[test]
    fn test_preview_tree_render() {
        let base = Path::new("/test");
        let mut tree = PreviewTree::new();
        tree.add_directory(base.join("folder1"));
        tree.add_move(base.join("file1.txt"), base.join("folder1/file1.txt"));
        tree.add_move(base.join("file2.txt"), base.join("folder1/file2.txt"));

        let preview = tree.render(base);
        assert!(preview.contains("📁 folder1/"));
        assert!(preview.contains("file1.txt (from: .)"));
        assert!(preview.contains("file2.txt"));
        assert!(preview.contains("Create 1 directories"));
        assert!(preview.contains("move 2 files"));
    }

    #[test]
    fn test_to_json() {
        let mut tree = PreviewTree::new();
        tree.add_copy(PathBuf::from("/t/x/a.txt"), PathBuf::from("/t/Unpacked/a.txt"));
        let json = tree.to_json().unwrap();
        assert!(json.contains("\"kind\": \"copy\""));
        assert!(json.contains("Unpacked"));
    }
}
