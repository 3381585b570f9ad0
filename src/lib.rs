pub mod app;
pub mod boxlayout;
pub mod config;
pub mod format;
pub mod listing;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod tree;
pub mod ui;
