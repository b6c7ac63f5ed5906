//! # Configuration System
//!
//! Two kinds of configuration live here:
//!
//! - [`LaunchConfig`] - the per-session selection (executable, base data file,
//!   overlays). Created empty for every session and only written to disk when
//!   the user saves it, as a flat JSON object in `gzrun-config.json`.
//! - [`LauncherSettings`] - the fixed values passed to every launch
//!   (engine config file, save directory) and console tuning, loaded from a
//!   TOML hierarchy.
//!
//! ## Settings Hierarchy
//!
//! Settings are loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.gzrun/config.toml`
//! 3. **Project config** - `./.gzrun/config.toml`
//!
//! ```toml
//! # ~/.gzrun/config.toml
//! [launch]
//! engine_config = "/home/me/games/engine/gzdoom.ini"
//! save_dir = "/home/me/games/engine/saves/"
//!
//! [console]
//! autoscroll_threshold = 60.0
//! ```

pub mod defaults;
pub mod errors;
pub mod loading;
pub mod persistence;
pub mod types;

pub use errors::ConfigError;
pub use loading::load_hierarchy;
pub use persistence::{CONFIG_FILE_NAME, load_launch_config, save_launch_config};
pub use types::{ConsoleSettings, LaunchConfig, LaunchSettings, LauncherSettings};
