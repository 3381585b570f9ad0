use crate::config::AppConfig;
use crate::listing::{spawn_loader, LoaderCommand, LoaderMessage, Snapshot};
use crate::models::{CommitFile, File, PatchStatus};
use crate::presentation::{
    aggregate_patch_status, directory_staging_state, line_text, render_commit_file_tree,
    render_file_tree, RenderOptions, TreeConnectors,
};
use crate::tree::{CollapsedPaths, Node, TreeBuilder};
use crate::ui::info_bar::is_spacer_window;
use crate::ui::layout::{window_dimensions, ArrangementContext, ScreenMode, SearchKind};
use crate::ui::panels::{self, MIN_HEIGHT, MIN_WIDTH};
use crate::ui::theme::Theme;
use crate::ui::tree_view::{TreeView, TreeViewState};
use crate::ui::windows;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::DefaultTerminal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const COMMAND_LOG_LIMIT: usize = 200;

/// Windows opened during this run. Nothing is persisted, so a restart
/// starts with an empty history.
#[derive(Debug, Default)]
pub struct SessionHistory {
    visited: HashSet<&'static str>,
}

impl SessionHistory {
    pub fn visit(&mut self, window: &'static str) {
        self.visited.insert(window);
    }

    pub fn has_visited(&self, window: &str) -> bool {
        self.visited.contains(window)
    }
}

pub struct App {
    config: AppConfig,
    theme: Theme,
    snapshot: Arc<Snapshot>,
    file_tree: Node<File>,
    commit_file_tree: Node<CommitFile>,
    file_collapsed: CollapsedPaths,
    commit_file_collapsed: CollapsedPaths,
    patch_selection: HashMap<String, PatchStatus>,
    files_view: TreeViewState,
    commit_files_view: TreeViewState,
    history: SessionHistory,
    current_window: &'static str,
    current_side_window: &'static str,
    screen_mode: ScreenMode,
    split_main_panel: bool,
    show_extras: bool,
    search: Option<SearchKind>,
    search_input: String,
    filter: String,
    command_log: Vec<String>,
    app_status: String,
    should_quit: bool,
    loader_tx: mpsc::Sender<LoaderCommand>,
    loader_rx: mpsc::Receiver<LoaderMessage>,
}

impl App {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let (loader_tx, loader_rx) = spawn_loader(config.listing.clone());

        // Request initial load
        loader_tx.send(LoaderCommand::Refresh).await?;

        let mut history = SessionHistory::default();
        history.visit(windows::FILES);

        Ok(Self {
            config,
            theme: Theme::default(),
            snapshot: Arc::new(Snapshot::default()),
            file_tree: Node::root(),
            commit_file_tree: Node::root(),
            file_collapsed: CollapsedPaths::new(),
            commit_file_collapsed: CollapsedPaths::new(),
            patch_selection: HashMap::new(),
            files_view: TreeViewState::new(),
            commit_files_view: TreeViewState::new(),
            history,
            current_window: windows::FILES,
            current_side_window: windows::FILES,
            screen_mode: ScreenMode::Normal,
            split_main_panel: false,
            show_extras: false,
            search: None,
            search_input: String::new(),
            filter: String::new(),
            command_log: Vec::new(),
            app_status: "Loading listing...".to_string(),
            should_quit: false,
            loader_tx,
            loader_rx,
        })
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            // Process loader messages
            while let Ok(msg) = self.loader_rx.try_recv() {
                self.handle_message(msg);
            }

            // Draw
            terminal.draw(|frame| self.render(frame))?;

            // Handle input
            if event::poll(Duration::from_millis(33))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await?;
                }
            }
        }

        Ok(())
    }

    fn handle_message(&mut self, msg: LoaderMessage) {
        match msg {
            LoaderMessage::Loaded(snapshot) => {
                self.log(format!(
                    "Loaded {} files and {} commit files",
                    snapshot.files.len(),
                    snapshot.commit_files.len()
                ));
                self.snapshot = snapshot;
                self.app_status.clear();
                self.rebuild_trees();
            }
            LoaderMessage::Error(e) => {
                self.app_status = format!("Error: {}", e);
                self.log(format!("Error: {}", e));
            }
        }
    }

    /// Rebuilds both trees from the current snapshot. Collapse state is kept
    /// because it is keyed by path.
    fn rebuild_trees(&mut self) {
        let builder = TreeBuilder::new();
        let snapshot = Arc::clone(&self.snapshot);

        let files = snapshot
            .files
            .iter()
            .filter(|f| self.filter.is_empty() || f.name.contains(&self.filter))
            .cloned();
        self.file_tree = builder.build(files);
        self.commit_file_tree = builder.build(snapshot.commit_files.iter().cloned());

        self.files_view
            .clamp(self.file_tree.visible_nodes(&self.file_collapsed).len());
        self.commit_files_view.clamp(
            self.commit_file_tree
                .visible_nodes(&self.commit_file_collapsed)
                .len(),
        );

        tracing::debug!(
            version = snapshot.version,
            filter = %self.filter,
            "rebuilt file trees"
        );
    }

    fn log(&mut self, entry: String) {
        tracing::debug!(%entry, "command log");
        self.command_log.push(entry);
        if self.command_log.len() > COMMAND_LOG_LIMIT {
            self.command_log.remove(0);
        }
    }

    fn any_mode_active(&self) -> bool {
        !self.filter.is_empty()
            || self
                .patch_selection
                .values()
                .any(|status| *status != PatchStatus::Unselected)
    }

    fn information(&self) -> String {
        if !self.filter.is_empty() {
            format!("Filtering by '{}'", self.filter)
        } else if self.any_mode_active() {
            "Building patch".to_string()
        } else {
            format!("git-dash {}", env!("CARGO_PKG_VERSION"))
        }
    }

    fn arrangement_context(&self, width: u16, height: u16) -> ArrangementContext<'_> {
        ArrangementContext {
            width,
            height,
            gui: &self.config.gui,
            labels: &self.config.labels,
            current_window: self.current_window,
            current_side_window: self.current_side_window,
            screen_mode: self.screen_mode,
            split_main_panel: self.split_main_panel,
            search: self.search,
            show_extras: self.show_extras,
            stash_visited: self.history.has_visited(windows::STASH),
            any_mode_active: self.any_mode_active(),
            in_demo: self.config.in_demo,
        }
    }

    fn render_options(&self) -> RenderOptions<'_> {
        let connectors = if self.config.gui.tree_lines {
            TreeConnectors::LINES
        } else {
            TreeConnectors::SPACES
        };
        RenderOptions::new(&self.theme).connectors(connectors)
    }

    fn render(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let information = self.information();
        let dimensions = {
            let ctx = self.arrangement_context(area.width, area.height);
            window_dimensions(&ctx, &information, &self.app_status)
        };

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            if let Some(limit) = dimensions.get(windows::LIMIT) {
                panels::render_limit(frame, (*limit).into(), &self.theme);
            }
            return;
        }

        for (name, dims) in &dimensions {
            if dims.is_empty() || name == windows::LIMIT || is_spacer_window(name) {
                continue;
            }
            self.render_window(frame, name, (*dims).into(), &information);
        }
    }

    fn render_window(
        &mut self,
        frame: &mut ratatui::Frame,
        name: &str,
        area: Rect,
        information: &str,
    ) {
        let focused = name == self.current_window;
        match name {
            windows::STATUS => {
                let lines = vec![Line::raw(format!(
                    "listing #{}: {} files, {} commit files",
                    self.snapshot.version,
                    self.snapshot.files.len(),
                    self.snapshot.commit_files.len()
                ))];
                panels::render_text_panel(frame, area, "Status", lines, focused, &self.theme);
            }
            windows::FILES => {
                let lines = render_file_tree(
                    &self.file_tree,
                    &self.file_collapsed,
                    &self.snapshot.submodules,
                    &self.render_options(),
                );
                TreeView::new(lines, "Files", focused, &mut self.files_view, &self.theme)
                    .render(frame, area);
            }
            windows::COMMITS => {
                let lines = render_commit_file_tree(
                    &self.commit_file_tree,
                    &self.commit_file_collapsed,
                    "",
                    &self.patch_selection,
                    &self.render_options(),
                );
                TreeView::new(
                    lines,
                    "Commit files",
                    focused,
                    &mut self.commit_files_view,
                    &self.theme,
                )
                .render(frame, area);
            }
            windows::BRANCHES => {
                panels::render_text_panel(frame, area, "Branches", Vec::new(), focused, &self.theme)
            }
            windows::STASH => {
                panels::render_text_panel(frame, area, "Stash", Vec::new(), focused, &self.theme)
            }
            windows::MAIN => {
                let lines = self.selection_summary();
                panels::render_text_panel(frame, area, "Selection", lines, focused, &self.theme);
            }
            windows::SECONDARY => {
                let lines = self.selection_files();
                panels::render_text_panel(frame, area, "Files below", lines, false, &self.theme);
            }
            windows::EXTRAS => {
                let height = usize::from(area.height.saturating_sub(2));
                let skip = self.command_log.len().saturating_sub(height);
                let lines = self.command_log[skip..]
                    .iter()
                    .map(|entry| Line::raw(entry.clone()))
                    .collect();
                panels::render_text_panel(frame, area, "Command log", lines, focused, &self.theme);
            }
            windows::APP_STATUS => {
                panels::render_bar_text(frame, area, &self.app_status, self.theme.partially_staged)
            }
            windows::OPTIONS => panels::render_bar_text(
                frame,
                area,
                "1-5: panels, /: search, ^s: filter, +/_: screen mode, q: quit",
                self.theme.options_text,
            ),
            windows::INFORMATION => {
                panels::render_bar_text(frame, area, information, self.theme.staged)
            }
            windows::SEARCH_PREFIX => {
                let prefix = match self.search {
                    Some(SearchKind::Filter) => &self.config.labels.filter_prefix,
                    _ => &self.config.labels.search_prefix,
                };
                panels::render_bar_text(frame, area, prefix, self.theme.staged)
            }
            windows::SEARCH => {
                panels::render_bar_text(frame, area, &self.search_input, self.theme.default_text)
            }
            _ => {}
        }
    }

    fn selected_file_node(&self) -> Option<&Node<File>> {
        let index = self.files_view.selected()?;
        self.file_tree
            .visible_nodes(&self.file_collapsed)
            .get(index)
            .copied()
    }

    fn selected_commit_file_node(&self) -> Option<&Node<CommitFile>> {
        let index = self.commit_files_view.selected()?;
        self.commit_file_tree
            .visible_nodes(&self.commit_file_collapsed)
            .get(index)
            .copied()
    }

    fn selection_summary(&self) -> Vec<Line<'static>> {
        if self.current_side_window == windows::COMMITS {
            let Some(node) = self.selected_commit_file_node() else {
                return vec![Line::raw("No commit file selected")];
            };
            let status = aggregate_patch_status(node, &self.patch_selection);
            let mut lines = vec![Line::raw(format!("Path: {}", node.path))];
            match &node.item {
                Some(file) => lines.push(Line::raw(format!("Change: {}", file.change_status))),
                None => lines.push(Line::raw(format!("Files: {}", node.files().len()))),
            }
            lines.push(Line::raw(format!("Patch: {:?}", status)));
            return lines;
        }

        let Some(node) = self.selected_file_node() else {
            return vec![Line::raw("No file selected")];
        };
        let mut lines = vec![Line::raw(format!("Path: {}", node.path))];
        match &node.item {
            Some(file) => {
                lines.push(Line::raw(format!("Status: {}", file.short_status)));
                if let Some(previous) = &file.previous_name {
                    lines.push(Line::raw(format!("Renamed from: {}", previous)));
                }
                if file.has_merge_conflicts {
                    lines.push(Line::raw("Has merge conflicts"));
                }
            }
            None => {
                lines.push(Line::raw(format!("Files: {}", node.files().len())));
                lines.push(Line::raw(format!("Changes: {:?}", directory_staging_state(node))));
            }
        }
        lines
    }

    fn selection_files(&self) -> Vec<Line<'static>> {
        if self.current_side_window == windows::COMMITS {
            return self
                .selected_commit_file_node()
                .map(|node| {
                    node.files()
                        .into_iter()
                        .map(|f| Line::raw(format!("{} {}", f.change_status, f.name)))
                        .collect()
                })
                .unwrap_or_default();
        }

        self.selected_file_node()
            .map(|node| {
                node.files()
                    .into_iter()
                    .map(|f| Line::raw(format!("{} {}", f.short_status, f.name)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn visible_len(&self) -> usize {
        if self.current_side_window == windows::COMMITS {
            self.commit_file_tree
                .visible_nodes(&self.commit_file_collapsed)
                .len()
        } else {
            self.file_tree.visible_nodes(&self.file_collapsed).len()
        }
    }

    fn tree_view_mut(&mut self) -> &mut TreeViewState {
        if self.current_side_window == windows::COMMITS {
            &mut self.commit_files_view
        } else {
            &mut self.files_view
        }
    }

    fn focus_window(&mut self, window: &'static str) {
        if windows::SIDE_WINDOWS.contains(&window) {
            self.current_side_window = window;
            self.history.visit(window);
        }
        self.current_window = window;
    }

    fn focus_side_offset(&mut self, offset: isize) {
        let count = windows::SIDE_WINDOWS.len() as isize;
        let current = windows::SIDE_WINDOWS
            .iter()
            .position(|w| *w == self.current_side_window)
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(count) as usize;
        self.focus_window(windows::SIDE_WINDOWS[next]);
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The prompt swallows everything while open
        if self.search.is_some() {
            self.handle_prompt_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search = Some(SearchKind::Filter);
                self.search_input = self.filter.clone();
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.filter.is_empty() {
                    self.should_quit = true;
                } else {
                    self.filter.clear();
                    self.rebuild_trees();
                }
            }
            KeyCode::Tab => self.focus_side_offset(1),
            KeyCode::BackTab => self.focus_side_offset(-1),
            KeyCode::Char(c @ '1'..='5') => {
                let index = usize::from(c as u8 - b'1');
                self.focus_window(windows::SIDE_WINDOWS[index]);
            }
            KeyCode::Char('0') => self.focus_window(windows::MAIN),
            KeyCode::Char('#') if self.show_extras => self.focus_window(windows::EXTRAS),
            KeyCode::Char('@') => {
                self.show_extras = !self.show_extras;
                if !self.show_extras && self.current_window == windows::EXTRAS {
                    self.current_window = self.current_side_window;
                }
            }
            KeyCode::Char('+') => self.screen_mode = self.screen_mode.next(),
            KeyCode::Char('_') => self.screen_mode = self.screen_mode.prev(),
            KeyCode::Char('s') => self.split_main_panel = !self.split_main_panel,
            KeyCode::Char('/') => {
                self.search = Some(SearchKind::Search);
                self.search_input.clear();
            }
            KeyCode::Char('R') => {
                self.app_status = "Reloading...".to_string();
                self.loader_tx.send(LoaderCommand::Refresh).await?;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.visible_len();
                self.tree_view_mut().select_next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let len = self.visible_len();
                self.tree_view_mut().select_previous(len);
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => self.toggle_selected(false),
            KeyCode::Char('h') | KeyCode::Left => self.toggle_selected(true),
            KeyCode::Char('-') => self.collapse_all(),
            KeyCode::Char('=') => {
                self.file_collapsed.expand_all();
                self.commit_file_collapsed.expand_all();
            }
            KeyCode::Char(' ') if self.current_side_window == windows::COMMITS => {
                self.toggle_patch_selection();
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search = None;
                self.search_input.clear();
            }
            KeyCode::Enter => {
                let query = std::mem::take(&mut self.search_input);
                match self.search.take() {
                    Some(SearchKind::Filter) => {
                        self.filter = query;
                        self.rebuild_trees();
                    }
                    Some(SearchKind::Search) => self.jump_to_match(&query),
                    None => {}
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
    }

    /// Moves the selection to the first line containing `query`.
    fn jump_to_match(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }

        let lines = if self.current_side_window == windows::COMMITS {
            render_commit_file_tree(
                &self.commit_file_tree,
                &self.commit_file_collapsed,
                "",
                &self.patch_selection,
                &self.render_options(),
            )
        } else {
            render_file_tree(
                &self.file_tree,
                &self.file_collapsed,
                &self.snapshot.submodules,
                &self.render_options(),
            )
        };

        let len = lines.len();
        match lines.iter().position(|line| line_text(line).contains(query)) {
            Some(index) => self.tree_view_mut().select(index, len),
            None => self.app_status = format!("No match for '{}'", query),
        }
    }

    /// Toggles the selected directory, or only collapses it.
    fn toggle_selected(&mut self, collapse_only: bool) {
        let path = if self.current_side_window == windows::COMMITS {
            self.selected_commit_file_node()
                .filter(|n| !n.is_file())
                .map(|n| n.path.clone())
        } else {
            self.selected_file_node()
                .filter(|n| !n.is_file())
                .map(|n| n.path.clone())
        };
        let Some(path) = path else {
            return;
        };

        let collapsed = if self.current_side_window == windows::COMMITS {
            &mut self.commit_file_collapsed
        } else {
            &mut self.file_collapsed
        };

        if collapse_only {
            collapsed.collapse(path);
        } else {
            collapsed.toggle(&path);
        }

        let len = self.visible_len();
        self.tree_view_mut().clamp(len);
    }

    fn collapse_all(&mut self) {
        if self.current_side_window == windows::COMMITS {
            self.commit_file_collapsed.collapse_all(&self.commit_file_tree);
        } else {
            self.file_collapsed.collapse_all(&self.file_tree);
        }
        let len = self.visible_len();
        self.tree_view_mut().clamp(len);
    }

    /// Adds the selected file or directory to the patch, or drops it when it
    /// is already wholly included.
    fn toggle_patch_selection(&mut self) {
        let Some(node) = self.selected_commit_file_node() else {
            return;
        };

        let include = aggregate_patch_status(node, &self.patch_selection) != PatchStatus::Whole;
        let names: Vec<String> = node.files().iter().map(|f| f.name.clone()).collect();

        for name in names {
            if include {
                self.patch_selection.insert(name, PatchStatus::Whole);
            } else {
                self.patch_selection.remove(&name);
            }
        }

        let selected = self
            .patch_selection
            .values()
            .filter(|s| **s == PatchStatus::Whole)
            .count();
        self.log(format!("Patch now includes {} files", selected));
    }
}
