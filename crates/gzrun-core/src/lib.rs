//! gzrun-core: Core library for the gzrun launcher
//!
//! This library holds everything the launcher window needs that is not
//! drawing: the launch configuration entity and its JSON persistence, the
//! launcher settings hierarchy, the native picker filter sets, argument
//! construction, process spawning with a chunked stdout stream, and the
//! console colorization rules. It is used by the UI and shares its logging
//! and error conventions with the build tool.
//!
//! # Main Entry Points
//!
//! - [`state`] - Launcher session state driven by typed events
//! - [`launch`] - Build the argument list and spawn the target program
//! - [`console`] - Classify output chunks and decide autoscroll
//! - [`config`] - Launch configuration and launcher settings
//! - [`pickers`] - File picker filter sets

pub mod config;
pub mod console;
pub mod errors;
pub mod events;
pub mod launch;
pub mod logging;
pub mod pickers;
pub mod state;

// Re-export commonly used types at crate root for convenience
pub use config::{LaunchConfig, LauncherSettings};
pub use console::{ConsoleLog, ConsoleRow, MessageKind, MessageStyle, ScrollMetrics};
pub use errors::GzrunError;
pub use launch::{LaunchError, LaunchHandle, LaunchPlan};
pub use pickers::{FileFilter, PickerKind, PickerSpec};
pub use state::{LauncherEvent, LauncherState};

// Re-export logging initialization
pub use logging::init_logging;
