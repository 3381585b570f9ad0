use std::collections::HashMap;

use crate::tree::TreeItem;

/// A file in the working tree, as reported by `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,
    /// Set when the file was renamed.
    pub previous_name: Option<String>,
    /// Two-character `XY` status code.
    pub short_status: String,
    pub has_staged_changes: bool,
    pub has_unstaged_changes: bool,
    pub tracked: bool,
    pub has_merge_conflicts: bool,
    pub has_inline_merge_conflicts: bool,
    pub is_worktree: bool,
}

impl File {
    pub fn new(name: impl Into<String>, short_status: &str) -> Self {
        let mut chars = short_status.chars();
        let staged = chars.next().unwrap_or(' ');
        let unstaged = chars.next().unwrap_or(' ');
        let code: String = [staged, unstaged].iter().collect();

        let untracked = matches!(code.as_str(), "??" | "A " | "AM");
        let has_no_staged_changes = matches!(staged, ' ' | 'U' | '?');
        let has_inline_merge_conflicts = matches!(code.as_str(), "UU" | "AA");
        let has_merge_conflicts = has_inline_merge_conflicts
            || matches!(code.as_str(), "DD" | "AU" | "UA" | "UD" | "DU");

        Self {
            name: name.into(),
            previous_name: None,
            short_status: code,
            has_staged_changes: !has_no_staged_changes,
            has_unstaged_changes: unstaged != ' ',
            tracked: !untracked,
            has_merge_conflicts,
            has_inline_merge_conflicts,
            is_worktree: false,
        }
    }

    pub fn renamed_from(mut self, previous_name: impl Into<String>) -> Self {
        self.previous_name = Some(previous_name.into());
        self
    }

    pub fn is_rename(&self) -> bool {
        self.previous_name.is_some()
    }

    pub fn is_submodule(&self, configs: &[SubmoduleConfig]) -> bool {
        configs.iter().any(|config| config.path == self.name)
    }
}

impl TreeItem for File {
    fn path(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleConfig {
    pub name: String,
    pub path: String,
    pub url: String,
}

/// A file touched by a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFile {
    pub name: String,
    /// One-letter code: A, M, R, D, C, T, or anything else git reports.
    pub change_status: String,
}

impl CommitFile {
    pub fn new(name: impl Into<String>, change_status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            change_status: change_status.into(),
        }
    }
}

impl TreeItem for CommitFile {
    fn path(&self) -> &str {
        &self.name
    }
}

/// How much of a commit file is included in the patch being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchStatus {
    #[default]
    Unselected,
    Part,
    Whole,
}

/// Where per-file patch selection comes from.
pub trait PatchStatusSource {
    fn file_status(&self, path: &str) -> PatchStatus;
}

impl PatchStatusSource for HashMap<String, PatchStatus> {
    fn file_status(&self, path: &str) -> PatchStatus {
        self.get(path).copied().unwrap_or_default()
    }
}

/// Which side of the index a directory's changes live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingState {
    /// Every change is staged.
    Staged,
    /// Some changes are staged, some are not.
    PartiallyStaged,
    Unstaged,
}

impl StagingState {
    pub fn from_flags(has_staged_changes: bool, has_unstaged_changes: bool) -> Self {
        match (has_staged_changes, has_unstaged_changes) {
            (true, false) => StagingState::Staged,
            (true, true) => StagingState::PartiallyStaged,
            _ => StagingState::Unstaged,
        }
    }
}
