use crate::boxlayout::LayoutBox;
use crate::format::{cell_width, decolorise};
use crate::ui::layout::ArrangementContext;
use crate::ui::windows;

pub const MAX_SPACER_BOXES: usize = 5;

/// Windows reserved for padding in the bottom line. Nothing is drawn in them.
pub const SPACER_WINDOWS: [&str; MAX_SPACER_BOXES] = [
    "statusSpacer1",
    "statusSpacer2",
    "statusSpacer3",
    "statusSpacer4",
    "statusSpacer5",
];

/// Hands out spacer windows from [`SPACER_WINDOWS`]. Running out means the
/// bottom line holds more segments than it was designed for.
#[derive(Debug, Default)]
pub struct SpacerBoxes {
    used: usize,
}

impl SpacerBoxes {
    fn next_window(&mut self) -> &'static str {
        let Some(&name) = SPACER_WINDOWS.get(self.used) else {
            panic!("info bar needs more than {MAX_SPACER_BOXES} spacer boxes");
        };
        self.used += 1;
        name
    }

    /// One cell of padding.
    pub fn fixed<'b>(&mut self) -> LayoutBox<'b> {
        LayoutBox::window(self.next_window()).size(1)
    }

    /// Padding that soaks up all free space.
    pub fn flexible<'b>(&mut self) -> LayoutBox<'b> {
        LayoutBox::window(self.next_window()).weight(1)
    }

    pub fn used(&self) -> usize {
        self.used
    }
}

pub fn is_spacer_window(name: &str) -> bool {
    SPACER_WINDOWS.contains(&name)
}

/// Inputs of the bottom line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoBar<'a> {
    pub information: &'a str,
    pub app_status: &'a str,
    /// Label of the active search or filter prompt.
    pub search_prefix: Option<&'a str>,
    pub show_bottom_line: bool,
    pub any_mode_active: bool,
    pub in_demo: bool,
}

impl<'a> InfoBar<'a> {
    pub fn from_context(
        ctx: &ArrangementContext<'a>,
        information: &'a str,
        app_status: &'a str,
    ) -> Self {
        Self {
            information,
            app_status,
            search_prefix: ctx.search_prefix(),
            show_bottom_line: ctx.gui.show_bottom_line,
            any_mode_active: ctx.any_mode_active,
            in_demo: ctx.in_demo,
        }
    }

    pub fn boxes<'b>(&self) -> Vec<LayoutBox<'b>> {
        if let Some(prefix) = self.search_prefix {
            return vec![
                LayoutBox::window(windows::SEARCH_PREFIX).size(cell_width(prefix)),
                LayoutBox::window(windows::SEARCH).weight(1),
            ];
        }

        let mut spacers = SpacerBoxes::default();

        // collect the real views first, spacers go in between at the end
        let mut segments: Vec<LayoutBox<'b>> = Vec::new();

        // app status flickers past in demos, so leave it out entirely
        if !self.in_demo && !self.app_status.is_empty() {
            segments.push(
                LayoutBox::window(windows::APP_STATUS).size(cell_width(self.app_status)),
            );
        }

        if self.show_bottom_line {
            segments.push(LayoutBox::window(windows::OPTIONS).weight(1));
        }

        if (self.show_bottom_line && !self.in_demo) || self.any_mode_active {
            // information carries colours, measure it without them
            let width = cell_width(&decolorise(self.information));
            segments.push(LayoutBox::window(windows::INFORMATION).size(width));
        }

        let first = segments
            .first()
            .and_then(|b| b.window_name())
            .map(str::to_owned);

        match (segments.len(), first.as_deref()) {
            // status on the left, information pinned to the right
            (2, Some(windows::APP_STATUS)) => segments.insert(1, spacers.flexible()),
            (1, Some(windows::INFORMATION)) => segments.insert(0, spacers.flexible()),
            (1, _) => {
                let only = &mut segments[0];
                only.size = None;
                only.weight = 1;
            }
            _ => {}
        }

        let mut result = Vec::with_capacity(segments.len() * 2);
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                result.push(spacers.fixed());
            }
            result.push(segment);
        }
        result
    }
}
