//! Arranges the dashboard windows for the current terminal size and app
//! state, using [`crate::boxlayout`].

use std::collections::HashMap;

use crate::boxlayout::{arrange_windows, Dimensions, Direction, LayoutBox};
use crate::config::{GuiConfig, Labels, MainPanelSplitMode, PortraitMode};
use crate::ui::info_bar::InfoBar;
use crate::ui::windows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    #[default]
    Normal,
    Half,
    Full,
}

impl ScreenMode {
    pub fn next(self) -> Self {
        match self {
            ScreenMode::Normal => ScreenMode::Half,
            ScreenMode::Half => ScreenMode::Full,
            ScreenMode::Full => ScreenMode::Normal,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ScreenMode::Normal => ScreenMode::Full,
            ScreenMode::Half => ScreenMode::Normal,
            ScreenMode::Full => ScreenMode::Half,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Search,
    Filter,
}

/// Read-only view of everything the arrangement depends on, assembled once
/// per redraw.
#[derive(Debug, Clone, Copy)]
pub struct ArrangementContext<'a> {
    pub width: u16,
    pub height: u16,
    pub gui: &'a GuiConfig,
    pub labels: &'a Labels,
    /// Window of the focused view, side or main.
    pub current_window: &'a str,
    /// Window of the most recently focused side view.
    pub current_side_window: &'a str,
    pub screen_mode: ScreenMode,
    pub split_main_panel: bool,
    pub search: Option<SearchKind>,
    pub show_extras: bool,
    pub stash_visited: bool,
    pub any_mode_active: bool,
    pub in_demo: bool,
}

pub fn should_use_portrait_mode(mode: PortraitMode, width: u16, height: u16) -> bool {
    match mode {
        PortraitMode::Never => false,
        PortraitMode::Always => true,
        PortraitMode::Auto => width <= 84 && height > 45,
    }
}

pub fn main_panels_side_by_side(mode: MainPanelSplitMode, width: u16, height: u16) -> bool {
    match mode {
        MainPanelSplitMode::Vertical => false,
        MainPanelSplitMode::Horizontal => true,
        // two 80 column panels plus 40 for the side panels
        MainPanelSplitMode::Auto => !(width < 200 && height > 30),
    }
}

impl<'a> ArrangementContext<'a> {
    pub fn portrait(&self) -> bool {
        should_use_portrait_mode(self.gui.portrait_mode, self.width, self.height)
    }

    pub fn split_main_panel_side_by_side(&self) -> bool {
        self.split_main_panel
            && main_panels_side_by_side(self.gui.main_panel_split_mode, self.width, self.height)
    }

    /// Returns `(side, main)` weights for the two halves of the screen.
    pub fn mid_section_weights(&self) -> (u32, u32) {
        let mut side = 1;
        let mut main = ((1.0 / self.gui.side_panel_width).floor() as u32).saturating_sub(1);

        if self.split_main_panel_side_by_side() {
            main = 5;
        }

        if self.current_window == windows::MAIN {
            if matches!(self.screen_mode, ScreenMode::Half | ScreenMode::Full) {
                side = 0;
            }
        } else {
            match self.screen_mode {
                ScreenMode::Half => main = 1,
                ScreenMode::Full => main = 0,
                ScreenMode::Normal => {}
            }
        }

        (side, main)
    }

    pub fn side_panel_children<'b>(&self, _width: u16, height: u16) -> Vec<LayoutBox<'b>> {
        let current = self.current_side_window;

        if matches!(self.screen_mode, ScreenMode::Half | ScreenMode::Full) {
            return windows::SIDE_WINDOWS
                .iter()
                .map(|&window| {
                    if window == current {
                        LayoutBox::window(window).weight(1)
                    } else {
                        LayoutBox::window(window).size(0)
                    }
                })
                .collect();
        }

        if height >= 28 {
            let accordion = |default: LayoutBox<'b>| {
                if self.gui.expand_focused_side_panel && default.window_name() == Some(current) {
                    LayoutBox::window(current).weight(2)
                } else {
                    default
                }
            };

            return vec![
                LayoutBox::window(windows::STATUS).size(3),
                accordion(LayoutBox::window(windows::FILES).weight(1)),
                accordion(LayoutBox::window(windows::BRANCHES).weight(1)),
                accordion(LayoutBox::window(windows::COMMITS).weight(1)),
                accordion(self.stash_window_box()),
            ];
        }

        let squashed_height = if height >= 21 { 3 } else { 1 };
        windows::SIDE_WINDOWS
            .iter()
            .map(|&window| {
                if window == current {
                    LayoutBox::window(window).weight(1)
                } else {
                    LayoutBox::window(window).size(squashed_height)
                }
            })
            .collect()
    }

    /// The stash window stays one line tall until it has been opened.
    fn stash_window_box<'b>(&self) -> LayoutBox<'b> {
        if self.stash_visited {
            LayoutBox::window(windows::STASH).weight(1)
        } else {
            LayoutBox::window(windows::STASH).size(3)
        }
    }

    pub fn main_section_children<'b>(&self) -> Vec<LayoutBox<'b>> {
        let main_fullscreen =
            self.screen_mode == ScreenMode::Full && self.current_window == windows::MAIN;

        if !self.split_main_panel || main_fullscreen {
            return vec![LayoutBox::window(windows::MAIN).weight(1)];
        }

        vec![
            LayoutBox::window(windows::MAIN).weight(1),
            LayoutBox::window(windows::SECONDARY).weight(1),
        ]
    }

    pub fn extras_window_size(&self) -> u16 {
        if !self.show_extras {
            return 0;
        }

        let base_size = if self.current_window == windows::EXTRAS {
            // fill whatever space is available
            1000
        } else if self.height < 40 {
            1
        } else {
            self.gui.command_log_size
        };

        const FRAME_SIZE: u16 = 2;
        base_size.saturating_add(FRAME_SIZE)
    }

    pub fn show_info_section(&self, app_status: &str) -> bool {
        self.gui.show_bottom_line
            || self.search.is_some()
            || self.any_mode_active
            || !app_status.is_empty()
    }

    pub fn search_prefix(&self) -> Option<&'a str> {
        let labels = self.labels;
        self.search.map(|kind| match kind {
            SearchKind::Search => labels.search_prefix.as_str(),
            SearchKind::Filter => labels.filter_prefix.as_str(),
        })
    }
}

/// Resolves every window's rectangle for this redraw.
pub fn window_dimensions(
    ctx: &ArrangementContext<'_>,
    information: &str,
    app_status: &str,
) -> HashMap<String, Dimensions> {
    let (side_weight, main_weight) = ctx.mid_section_weights();

    let side_panels_direction = if ctx.portrait() {
        Direction::Row
    } else {
        Direction::Column
    };

    let main_panels_direction = if ctx.split_main_panel_side_by_side() {
        Direction::Column
    } else {
        Direction::Row
    };

    let info_section_size = if ctx.show_info_section(app_status) { 1 } else { 0 };
    let info_bar = InfoBar::from_context(ctx, information, app_status);

    let root = LayoutBox::split(
        Direction::Row,
        vec![
            LayoutBox::split(
                side_panels_direction,
                vec![
                    LayoutBox::conditional(Direction::Row, move |width, height| {
                        ctx.side_panel_children(width, height)
                    })
                    .weight(side_weight),
                    LayoutBox::split(
                        Direction::Row,
                        vec![
                            LayoutBox::split(main_panels_direction, ctx.main_section_children())
                                .weight(1),
                            LayoutBox::window(windows::EXTRAS).size(ctx.extras_window_size()),
                        ],
                    )
                    .weight(main_weight),
                ],
            )
            .weight(1),
            LayoutBox::split(Direction::Column, info_bar.boxes()).size(info_section_size),
        ],
    );

    tracing::debug!(
        width = ctx.width,
        height = ctx.height,
        side_weight,
        main_weight,
        portrait = ctx.portrait(),
        "arranging windows"
    );

    let mut dimensions = arrange_windows(&root, 0, 0, ctx.width, ctx.height);
    dimensions.extend(arrange_windows(
        &LayoutBox::window(windows::LIMIT),
        0,
        0,
        ctx.width,
        ctx.height,
    ));
    dimensions
}
