pub mod cli;
pub mod file;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub gui: GuiConfig,
    pub labels: Labels,
    pub listing: ListingConfig,
    pub in_demo: bool,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub portrait_mode: PortraitMode,
    /// Fraction of the width given to the side panels, in (0, 1).
    pub side_panel_width: f64,
    pub main_panel_split_mode: MainPanelSplitMode,
    /// Accordion mode: the focused side panel gets twice the space.
    pub expand_focused_side_panel: bool,
    pub show_bottom_line: bool,
    pub command_log_size: u16,
    /// Draw tree connectors with box-drawing characters instead of spaces.
    pub tree_lines: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            portrait_mode: PortraitMode::Auto,
            side_panel_width: 0.3333,
            main_panel_split_mode: MainPanelSplitMode::Auto,
            expand_focused_side_panel: false,
            show_bottom_line: true,
            command_log_size: 8,
            tree_lines: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PortraitMode {
    Never,
    Always,
    #[default]
    #[serde(other)]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainPanelSplitMode {
    /// Main panels stacked on top of each other.
    Vertical,
    /// Main panels side by side.
    Horizontal,
    #[default]
    #[serde(other)]
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub search_prefix: String,
    pub filter_prefix: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            search_prefix: "Search: ".to_string(),
            filter_prefix: "Filter: ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Working-tree listing in `git status --porcelain` format.
    pub files: Option<PathBuf>,
    /// Commit file listing in `git diff --name-status` format.
    pub commit_files: Option<PathBuf>,
    /// `.gitmodules` of the repository, for marking submodules.
    pub submodules: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("side_panel_width must be between 0 and 1 (exclusive), got {0}")]
    SidePanelWidth(f64),
}

impl GuiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.side_panel_width > 0.0 && self.side_panel_width < 1.0) {
            return Err(ConfigError::SidePanelWidth(self.side_panel_width));
        }
        Ok(())
    }
}
