//! Launcher session state.
//!
//! [`LauncherState`] owns everything the launcher window mutates: the current
//! [`LaunchConfig`](crate::config::LaunchConfig), the "required missing" flags,
//! the per-picker in-flight markers and the console log. Changes arrive as
//! [`LauncherEvent`]s so the rules can be tested without a window.

pub mod events;
pub mod session;

pub use events::LauncherEvent;
pub use session::LauncherState;
