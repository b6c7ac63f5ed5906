//! Application state for gzrun-ui.
//!
//! The main type is `AppState`, a facade over the launcher session from
//! gzrun-core plus the window-only bits (settings, error banner, save status).

pub mod app_state;

pub use app_state::AppState;
