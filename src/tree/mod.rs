pub mod collapsed;

pub use collapsed::CollapsedPaths;

use std::cmp::Ordering;

/// Path of the synthetic top-level directory shown when the root item is on.
pub const ROOT_ITEM_PATH: &str = ".";

/// Anything that can be placed in a [`Node`] tree by its slash-separated path.
pub trait TreeItem {
    fn path(&self) -> &str;
}

/// A directory (no item) or a file (with item) in a path tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub path: String,
    pub item: Option<T>,
    pub children: Vec<Node<T>>,
    /// Number of single-child directories folded into this one.
    pub compression_level: usize,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::directory(String::new())
    }
}

impl<T> Node<T> {
    pub fn root() -> Self {
        Self::default()
    }

    fn directory(path: String) -> Self {
        Self {
            path,
            item: None,
            children: Vec::new(),
            compression_level: 0,
        }
    }

    pub fn is_file(&self) -> bool {
        self.item.is_some()
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn every_file(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.every_file_by(&predicate)
    }

    fn every_file_by(&self, predicate: &dyn Fn(&T) -> bool) -> bool {
        match &self.item {
            Some(item) => predicate(item),
            None => self.children.iter().all(|c| c.every_file_by(predicate)),
        }
    }

    pub fn any_file(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.any_file_by(&predicate)
    }

    fn any_file_by(&self, predicate: &dyn Fn(&T) -> bool) -> bool {
        match &self.item {
            Some(item) => predicate(item),
            None => self.children.iter().any(|c| c.any_file_by(predicate)),
        }
    }

    /// Items of every file below this node, in tree order.
    pub fn files(&self) -> Vec<&T> {
        let mut files = Vec::new();
        self.collect_files(&mut files);
        files
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a T>) {
        match &self.item {
            Some(item) => out.push(item),
            None => self.children.iter().for_each(|c| c.collect_files(out)),
        }
    }

    pub fn find_by_path(&self, path: &str) -> Option<&Node<T>> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_path(path))
    }

    /// Paths of every directory below the root.
    pub fn directory_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        for child in &self.children {
            child.collect_directory_paths(&mut paths);
        }
        paths
    }

    fn collect_directory_paths<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.is_file() {
            return;
        }
        out.push(&self.path);
        for child in &self.children {
            child.collect_directory_paths(out);
        }
    }

    /// Nodes in the order they are displayed: pre-order, without the root,
    /// skipping the contents of collapsed directories.
    pub fn visible_nodes(&self, collapsed: &CollapsedPaths) -> Vec<&Node<T>> {
        let mut nodes = Vec::new();
        if self.is_file() || collapsed.is_collapsed(&self.path) {
            return nodes;
        }
        for child in &self.children {
            child.collect_visible(collapsed, &mut nodes);
        }
        nodes
    }

    fn collect_visible<'a>(&'a self, collapsed: &CollapsedPaths, out: &mut Vec<&'a Node<T>>) {
        out.push(self);
        if self.is_file() || collapsed.is_collapsed(&self.path) {
            return;
        }
        for child in &self.children {
            child.collect_visible(collapsed, out);
        }
    }

    fn sort(&mut self) {
        self.children.sort_by(|a, b| {
            // Directories first, then by path
            match (a.is_file(), b.is_file()) {
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                _ => a.path.cmp(&b.path),
            }
        });

        for child in &mut self.children {
            child.sort();
        }
    }

    /// Folds chains of single-child directories into one node, e.g. `a` with
    /// only `a/b` inside becomes `a/b` at compression level 1.
    fn compress(&mut self) {
        for child in &mut self.children {
            while child.path != ROOT_ITEM_PATH
                && !child.is_file()
                && child.children.len() == 1
                && !child.children[0].is_file()
            {
                let level = child.compression_level + 1;
                let grandchild = child.children.remove(0);
                *child = grandchild;
                child.compression_level = level;
            }
            child.compress();
        }
    }
}

impl<T: TreeItem> Node<T> {
    /// Adds `item` under its path, creating directories along the way. An
    /// item at an existing path replaces the old one.
    pub fn insert(&mut self, item: T) {
        let segments = owned_segments(item.path());
        self.insert_segments(&segments, item);
    }

    fn insert_segments(&mut self, segments: &[String], item: T) {
        if segments.is_empty() {
            return;
        }

        let mut current = self;
        for i in 0..segments.len() {
            let path = segments[..=i].join("/");
            let idx = match current.children.iter().position(|c| c.path == path) {
                Some(idx) => idx,
                None => {
                    current.children.push(Node::directory(path));
                    current.children.len() - 1
                }
            };
            current = &mut current.children[idx];
        }
        current.item = Some(item);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    show_root_item: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest everything under a `.` directory so the whole tree can be
    /// collapsed at once.
    pub fn show_root_item(mut self, show: bool) -> Self {
        self.show_root_item = show;
        self
    }

    pub fn build<T: TreeItem>(&self, items: impl IntoIterator<Item = T>) -> Node<T> {
        let mut root = Node::root();

        for item in items {
            let mut segments = owned_segments(item.path());
            if segments.is_empty() {
                continue;
            }
            if self.show_root_item {
                segments.insert(0, ROOT_ITEM_PATH.to_string());
            }
            root.insert_segments(&segments, item);
        }

        root.sort();
        root.compress();
        root
    }
}

/// Splits a path on `/`, dropping empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn owned_segments(path: &str) -> Vec<String> {
    split_path(path).into_iter().map(str::to_owned).collect()
}
