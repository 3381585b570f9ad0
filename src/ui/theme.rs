use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub selected_line: Style,
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub default_text: Style,
    pub options_text: Style,
    pub staged: Style,
    pub partially_staged: Style,
    pub unstaged_changes: Style,
    /// Directory currently shown in the main panel.
    pub diff_terminal: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            selected_line: Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Green),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            default_text: Style::default(),
            options_text: Style::default().fg(Color::Blue),
            staged: Style::default().fg(Color::Green),
            partially_staged: Style::default().fg(Color::Yellow),
            unstaged_changes: Style::default().fg(Color::Red),
            diff_terminal: Style::default().fg(Color::Magenta),
        }
    }
}
