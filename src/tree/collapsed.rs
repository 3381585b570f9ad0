use std::collections::HashSet;

use super::Node;

/// Directory paths the user has collapsed. Keyed by path, so the state
/// survives rebuilding the tree from a fresh listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedPaths {
    paths: HashSet<String>,
}

impl CollapsedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn collapse(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    pub fn expand(&mut self, path: &str) {
        self.paths.remove(path);
    }

    /// Flips the state of `path` and returns whether it is now collapsed.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.paths.remove(path) {
            false
        } else {
            self.paths.insert(path.to_string());
            true
        }
    }

    /// Expands every directory on the way to `path` so it becomes visible.
    pub fn expand_to_path(&mut self, path: &str) {
        let segments: Vec<&str> = path.split('/').collect();
        for i in 0..segments.len() {
            self.paths.remove(&segments[..=i].join("/"));
        }
    }

    pub fn collapse_all<T>(&mut self, tree: &Node<T>) {
        self.paths
            .extend(tree.directory_paths().into_iter().map(str::to_owned));
    }

    pub fn expand_all(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
