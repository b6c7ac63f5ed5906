//! View components for gzrun-ui.
//!
//! - `main_view` - Root view: header, error banner, both panes
//! - `selection_panel` - The three pickers, launch and save controls
//! - `console_log` - Colorized, autoscrolling output of the launched program

pub mod console_log;
pub mod main_view;
pub mod selection_panel;

pub use main_view::MainView;
