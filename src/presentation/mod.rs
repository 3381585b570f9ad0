//! Renders file trees into display lines: connectors, arrows, status
//! glyphs, icons and labels.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::format::escape_special_chars;
use crate::models::{CommitFile, File, PatchStatus, PatchStatusSource, StagingState, SubmoduleConfig};
use crate::tree::{CollapsedPaths, Node, ROOT_ITEM_PATH};
use crate::ui::theme::Theme;

pub const EXPANDED_ARROW: &str = "▼";
pub const COLLAPSED_ARROW: &str = "▶";

/// Strings drawn in front of nested tree items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConnectors {
    /// Before a child that has siblings after it.
    pub inner: &'static str,
    /// Before the last child.
    pub last: &'static str,
    /// Continues an `inner` connector on the lines below it.
    pub nested: &'static str,
    /// Continues a `last` connector on the lines below it.
    pub nothing: &'static str,
}

impl TreeConnectors {
    pub const SPACES: Self = Self {
        inner: "  ",
        last: "  ",
        nested: "  ",
        nothing: "  ",
    };

    pub const LINES: Self = Self {
        inner: "├─",
        last: "└─",
        nested: "│ ",
        nothing: "  ",
    };
}

impl Default for TreeConnectors {
    fn default() -> Self {
        Self::SPACES
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub glyph: String,
    /// 256-colour palette index.
    pub color: u8,
}

pub trait IconProvider {
    fn icon_for_file(
        &self,
        name: &str,
        is_submodule: bool,
        is_linked_worktree: bool,
        is_directory: bool,
    ) -> Option<Icon>;
}

/// Icons turned off.
pub struct NoIcons;

impl IconProvider for NoIcons {
    fn icon_for_file(&self, _: &str, _: bool, _: bool, _: bool) -> Option<Icon> {
        None
    }
}

pub struct RenderOptions<'a> {
    pub theme: &'a Theme,
    pub connectors: TreeConnectors,
    pub icons: &'a dyn IconProvider,
}

impl<'a> RenderOptions<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            connectors: TreeConnectors::SPACES,
            icons: &NoIcons,
        }
    }

    pub fn connectors(mut self, connectors: TreeConnectors) -> Self {
        self.connectors = connectors;
        self
    }

    pub fn icons(mut self, icons: &'a dyn IconProvider) -> Self {
        self.icons = icons;
        self
    }
}

pub fn render_file_tree(
    tree: &Node<File>,
    collapsed: &CollapsedPaths,
    submodules: &[SubmoduleConfig],
    options: &RenderOptions<'_>,
) -> Vec<Line<'static>> {
    render_tree(tree, collapsed, options.connectors, &|node, depth| {
        file_line(node, &file_name_at_depth(node, depth), collapsed, submodules, options)
    })
}

pub fn render_commit_file_tree(
    tree: &Node<CommitFile>,
    collapsed: &CollapsedPaths,
    diff_name: &str,
    patch: &dyn PatchStatusSource,
    options: &RenderOptions<'_>,
) -> Vec<Line<'static>> {
    render_tree(tree, collapsed, options.connectors, &|node, depth| {
        // for a file this is just its own status, for a directory it sums up
        // every file below it
        let status = aggregate_patch_status(node, patch);
        commit_file_line(
            node,
            &commit_file_name_at_depth(node, depth),
            collapsed,
            diff_name,
            status,
            options,
        )
    })
}

/// WHOLE if every file below is whole, UNSELECTED if none is selected at
/// all, PART otherwise.
pub fn aggregate_patch_status(node: &Node<CommitFile>, patch: &dyn PatchStatusSource) -> PatchStatus {
    if node.every_file(|file| patch.file_status(&file.name) == PatchStatus::Whole) {
        PatchStatus::Whole
    } else if node.every_file(|file| patch.file_status(&file.name) == PatchStatus::Unselected) {
        PatchStatus::Unselected
    } else {
        PatchStatus::Part
    }
}

pub fn directory_staging_state(node: &Node<File>) -> StagingState {
    StagingState::from_flags(
        node.any_file(|file| file.has_staged_changes),
        node.any_file(|file| file.has_unstaged_changes),
    )
}

#[derive(Debug, Clone, Copy)]
enum Connector {
    None,
    Inner,
    Last,
}

struct Traversal<'a, T> {
    collapsed: &'a CollapsedPaths,
    connectors: TreeConnectors,
    render_line: &'a dyn Fn(&Node<T>, usize) -> Vec<Span<'static>>,
}

fn render_tree<T>(
    root: &Node<T>,
    collapsed: &CollapsedPaths,
    connectors: TreeConnectors,
    render_line: &dyn Fn(&Node<T>, usize) -> Vec<Span<'static>>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if root.is_file() || collapsed.is_collapsed(&root.path) {
        return lines;
    }

    let traversal = Traversal {
        collapsed,
        connectors,
        render_line,
    };
    for child in &root.children {
        render_node(
            &traversal,
            child,
            root.compression_level,
            "",
            Connector::None,
            &mut lines,
        );
    }
    lines
}

fn render_node<T>(
    traversal: &Traversal<'_, T>,
    node: &Node<T>,
    depth: usize,
    prefix: &str,
    connector: Connector,
    out: &mut Vec<Line<'static>>,
) {
    let connectors = traversal.connectors;
    let (connector_str, continuation) = match connector {
        Connector::None => ("", ""),
        Connector::Inner => (connectors.inner, connectors.nested),
        Connector::Last => (connectors.last, connectors.nothing),
    };

    let mut spans = Vec::new();
    let lead = format!("{prefix}{connector_str}");
    if !lead.is_empty() {
        spans.push(Span::raw(lead));
    }
    spans.extend((traversal.render_line)(node, depth));
    out.push(Line::from(spans));

    if node.is_file() || traversal.collapsed.is_collapsed(&node.path) {
        return;
    }

    let child_prefix = format!("{prefix}{continuation}");
    let child_depth = depth + 1 + node.compression_level;
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let connector = if i == last {
            Connector::Last
        } else {
            Connector::Inner
        };
        render_node(traversal, child, child_depth, &child_prefix, connector, out);
    }
}

fn arrow(collapsed: &CollapsedPaths, path: &str) -> &'static str {
    if collapsed.is_collapsed(path) {
        COLLAPSED_ARROW
    } else {
        EXPANDED_ARROW
    }
}

fn file_line(
    node: &Node<File>,
    name: &str,
    collapsed: &CollapsedPaths,
    submodules: &[SubmoduleConfig],
    options: &RenderOptions<'_>,
) -> Vec<Span<'static>> {
    let theme = options.theme;
    let mut spans = Vec::new();

    match &node.item {
        None => {
            let style = match directory_staging_state(node) {
                StagingState::Staged => theme.staged,
                StagingState::PartiallyStaged => theme.partially_staged,
                StagingState::Unstaged => theme.unstaged_changes,
            };
            spans.push(Span::styled(arrow(collapsed, &node.path), style));
            spans.push(Span::raw(" "));
        }
        Some(file) => {
            let mut status = file.short_status.chars();
            let first = status.next().unwrap_or(' ');
            let second = status.next().unwrap_or(' ');

            let first_style = match first {
                '?' => theme.unstaged_changes,
                ' ' => theme.default_text,
                _ => theme.staged,
            };
            let second_style = if second == ' ' {
                theme.default_text
            } else {
                theme.unstaged_changes
            };

            spans.push(Span::styled(first.to_string(), first_style));
            spans.push(Span::styled(second.to_string(), second_style));
            spans.push(Span::styled(" ", theme.default_text));
        }
    }

    let is_submodule = node
        .item
        .as_ref()
        .is_some_and(|file| file.is_submodule(submodules));
    let is_linked_worktree = node.item.as_ref().is_some_and(|file| file.is_worktree);

    push_icon(&mut spans, options, name, is_submodule, is_linked_worktree, !node.is_file());
    spans.push(Span::styled(
        escape_special_chars(name).into_owned(),
        theme.default_text,
    ));

    if is_submodule {
        spans.push(Span::styled(" (submodule)", theme.default_text));
    }

    spans
}

fn commit_file_line(
    node: &Node<CommitFile>,
    name: &str,
    collapsed: &CollapsedPaths,
    diff_name: &str,
    status: PatchStatus,
    options: &RenderOptions<'_>,
) -> Vec<Span<'static>> {
    let theme = options.theme;
    let mut spans = Vec::new();

    match &node.item {
        None => {
            let style = if diff_name == name {
                theme.diff_terminal
            } else {
                match status {
                    PatchStatus::Whole => theme.staged,
                    PatchStatus::Part => theme.partially_staged,
                    PatchStatus::Unselected => theme.default_text,
                }
            };
            spans.push(Span::styled(arrow(collapsed, &node.path), style));
            spans.push(Span::raw(" "));
        }
        Some(file) => {
            spans.push(Span::styled(
                file.change_status.clone(),
                change_status_style(&file.change_status, theme),
            ));
            spans.push(Span::raw(" "));
        }
    }

    push_icon(&mut spans, options, name, false, false, !node.is_file());
    spans.push(Span::styled(
        escape_special_chars(name).into_owned(),
        theme.default_text,
    ));

    spans
}

fn push_icon(
    spans: &mut Vec<Span<'static>>,
    options: &RenderOptions<'_>,
    name: &str,
    is_submodule: bool,
    is_linked_worktree: bool,
    is_directory: bool,
) {
    if let Some(icon) =
        options
            .icons
            .icon_for_file(name, is_submodule, is_linked_worktree, is_directory)
    {
        spans.push(Span::styled(
            icon.glyph,
            Style::default().fg(Color::Indexed(icon.color)),
        ));
        spans.push(Span::raw(" "));
    }
}

pub fn change_status_style(change_status: &str, theme: &Theme) -> Style {
    match change_status {
        "A" => Style::default().fg(Color::Green),
        "M" | "R" => Style::default().fg(Color::Yellow),
        "D" => theme.unstaged_changes,
        "C" => Style::default().fg(Color::Cyan),
        "T" => Style::default().fg(Color::Magenta),
        _ => theme.default_text,
    }
}

/// Label of a working-tree node whose first `depth` segments are already
/// implied by its ancestors.
pub fn file_name_at_depth(node: &Node<File>, depth: usize) -> String {
    let split_name: Vec<&str> = node.path.split('/').collect();
    let depth = depth.min(split_name.len());
    let name = split_name[depth..].join("/");

    let Some(previous_name) = node.item.as_ref().and_then(|f| f.previous_name.as_deref()) else {
        return name;
    };

    let mut split_prev: Vec<&str> = previous_name.split('/').collect();
    if split_name.first() == Some(&ROOT_ITEM_PATH) {
        split_prev.insert(0, ROOT_ITEM_PATH);
    }

    // a rename inside the same directory can drop the shared prefix too
    let same_parent_dir =
        split_name.len() == split_prev.len() && split_name[..depth] == split_prev[..depth];
    let prev_name = if same_parent_dir {
        split_prev[depth..].join("/")
    } else {
        previous_name.to_string()
    };

    format!("{prev_name} → {name}")
}

pub fn commit_file_name_at_depth(node: &Node<CommitFile>, depth: usize) -> String {
    let split_name: Vec<&str> = node.path.split('/').collect();
    split_name[depth.min(split_name.len())..].join("/")
}

/// Text of a rendered line without styling.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
