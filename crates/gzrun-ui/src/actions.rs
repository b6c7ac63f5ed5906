//! Business logic handlers for gzrun-ui.
//!
//! Thin wrappers over gzrun-core that log the outcome and turn errors into
//! messages for the error banner.

use std::path::{Path, PathBuf};

use gzrun_core::config::{self, CONFIG_FILE_NAME};
use gzrun_core::launch::{self, LaunchHandle, LaunchPlan};
use gzrun_core::{LaunchConfig, LauncherSettings};

/// Load launcher settings from the config hierarchy.
///
/// A broken config file does not keep the window from opening: defaults are
/// used and the error is returned for the banner.
pub fn load_settings() -> (LauncherSettings, Vec<String>) {
    match config::load_hierarchy() {
        Ok(settings) => {
            tracing::info!(
                event = "ui.settings.load_completed",
                engine_config = %settings.engine_config().display(),
                save_dir = %settings.save_dir().display()
            );
            (settings, Vec::new())
        }
        Err(e) => {
            tracing::warn!(
                event = "ui.settings.load_failed",
                error = %e,
                "Falling back to default settings"
            );
            (
                LauncherSettings::default(),
                vec![format!("Settings not loaded, using defaults: {e}")],
            )
        }
    }
}

/// Start the selected program with the current selection.
pub fn launch_program(
    config: &LaunchConfig,
    settings: &LauncherSettings,
) -> Result<LaunchHandle, String> {
    let plan = LaunchPlan::build(config, settings).map_err(|e| {
        tracing::warn!(event = "ui.launch.rejected", error = %e);
        e.to_string()
    })?;

    tracing::info!(
        event = "ui.launch.started",
        program = %plan.program.display(),
        args = ?plan.display_args()
    );

    match launch::spawn(&plan) {
        Ok(handle) => {
            tracing::info!(event = "ui.launch.completed", pid = handle.pid);
            Ok(handle)
        }
        Err(e) => {
            tracing::error!(event = "ui.launch.failed", error = %e);
            Err(e.to_string())
        }
    }
}

/// Persist the selection as `gzrun-config.json` in the working directory.
pub fn save_config(config: &LaunchConfig) -> Result<PathBuf, String> {
    let cwd = std::env::current_dir().map_err(|e| {
        tracing::error!(event = "ui.save.cwd_unavailable", error = %e);
        format!("Cannot determine working directory: {e}")
    })?;
    save_config_in(config, &cwd)
}

fn save_config_in(config: &LaunchConfig, dir: &Path) -> Result<PathBuf, String> {
    let path = dir.join(CONFIG_FILE_NAME);
    match config::save_launch_config(config, &path) {
        Ok(()) => {
            tracing::info!(event = "ui.save.completed", path = %path.display());
            Ok(path)
        }
        Err(e) => {
            tracing::error!(event = "ui.save.failed", error = %e);
            Err(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_config_writes_nulls() {
        let dir = TempDir::new().unwrap();
        let path = save_config_in(&LaunchConfig::new(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            r#"{"gzdoomExecutablePath":null,"iwadPath":null,"externalFilePaths":[]}"#
        );
    }

    #[test]
    fn test_save_config_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let error = save_config_in(&LaunchConfig::new(), &missing).unwrap_err();
        assert!(error.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_launch_without_selection_is_rejected() {
        let error = launch_program(&LaunchConfig::new(), &LauncherSettings::default())
            .err()
            .unwrap();
        assert_eq!(error, "No engine executable selected");
    }

    #[test]
    fn test_launch_missing_program_reports_spawn_error() {
        let config = LaunchConfig {
            executable_path: Some(PathBuf::from("/nonexistent/gzdoom")),
            base_path: Some(PathBuf::from("DOOM2.WAD")),
            overlay_paths: Vec::new(),
        };
        let error = launch_program(&config, &LauncherSettings::default())
            .err()
            .unwrap();
        assert!(error.starts_with("Failed to start '/nonexistent/gzdoom'"));
    }
}
