use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

/// Selection within a rendered tree. Indexes line up with
/// [`crate::tree::Node::visible_nodes`].
#[derive(Debug, Default)]
pub struct TreeViewState {
    pub list_state: ListState,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Keeps the selection on one of `len` lines, or clears it when empty.
    pub fn clamp(&mut self, len: usize) {
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn select_next(&mut self, len: usize) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i + 1));
        }
        self.clamp(len);
    }

    pub fn select_previous(&mut self, len: usize) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
        self.clamp(len);
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.list_state.select(Some(index));
        self.clamp(len);
    }
}

pub struct TreeView<'a> {
    lines: Vec<Line<'static>>,
    title: &'a str,
    focused: bool,
    state: &'a mut TreeViewState,
    theme: &'a Theme,
}

impl<'a> TreeView<'a> {
    pub fn new(
        lines: Vec<Line<'static>>,
        title: &'a str,
        focused: bool,
        state: &'a mut TreeViewState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            lines,
            title,
            focused,
            state,
            theme,
        }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        self.state.clamp(self.lines.len());

        let items: Vec<ListItem> = self.lines.into_iter().map(ListItem::new).collect();

        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        let mut list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", self.title))
                .title_style(self.theme.title),
        );
        if self.focused {
            list = list.highlight_style(self.theme.selected_line);
        }

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
