pub mod info_bar;
pub mod layout;
pub mod panels;
pub mod theme;
pub mod tree_view;

/// Names of every window the arrangement can place.
pub mod windows {
    pub const STATUS: &str = "status";
    pub const FILES: &str = "files";
    pub const BRANCHES: &str = "branches";
    pub const COMMITS: &str = "commits";
    pub const STASH: &str = "stash";

    pub const MAIN: &str = "main";
    pub const SECONDARY: &str = "secondary";
    /// Command log.
    pub const EXTRAS: &str = "extras";

    pub const APP_STATUS: &str = "appStatus";
    pub const OPTIONS: &str = "options";
    pub const INFORMATION: &str = "information";
    pub const SEARCH_PREFIX: &str = "searchPrefix";
    pub const SEARCH: &str = "search";

    /// Covers the whole terminal; used for the "too small" notice.
    pub const LIMIT: &str = "limit";

    pub const SIDE_WINDOWS: [&str; 5] = [STATUS, FILES, BRANCHES, COMMITS, STASH];
}
