//! Default values for launcher settings.

use std::path::PathBuf;

/// Base directory for gzrun data (`~/.gzrun`).
///
/// Falls back to `./.gzrun` when the home directory cannot be determined.
pub fn gzrun_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".gzrun"),
        None => {
            tracing::warn!(
                event = "core.config.home_dir_not_found",
                fallback = ".",
                "Could not determine home directory - using current directory as fallback"
            );
            PathBuf::from(".").join(".gzrun")
        }
    }
}

pub fn default_engine_config() -> PathBuf {
    gzrun_dir().join("gzdoom.ini")
}

pub fn default_save_dir() -> PathBuf {
    gzrun_dir().join("saves")
}
