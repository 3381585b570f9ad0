use crate::ui::theme::Theme;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Below this size no panel fits; only the notice is drawn.
pub const MIN_WIDTH: u16 = 10;
pub const MIN_HEIGHT: u16 = 9;

pub fn render_text_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    focused: bool,
    theme: &Theme,
) {
    let border_style = if focused {
        theme.border_focused
    } else {
        theme.border
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", title))
                .title_style(theme.title),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Borderless single-line segment of the bottom bar.
pub fn render_bar_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    frame.render_widget(Paragraph::new(Line::styled(text.to_string(), style)), area);
}

pub fn render_limit(frame: &mut Frame, area: Rect, theme: &Theme) {
    let paragraph = Paragraph::new("Not enough space to render panels")
        .style(theme.default_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
