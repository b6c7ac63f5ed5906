//! Settings loading and merging logic.
//!
//! # Settings Hierarchy
//!
//! Settings are loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.gzrun/config.toml`
//! 3. **Project config** - `./.gzrun/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::ConfigError;
use super::types::{ConsoleSettings, LaunchSettings, LauncherSettings};

/// Load launcher settings from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed,
/// or if the merged settings are invalid. Missing config files are not errors.
pub fn load_hierarchy() -> Result<LauncherSettings, ConfigError> {
    let mut sources = vec![super::defaults::gzrun_dir().join("config.toml")];
    if let Ok(cwd) = std::env::current_dir() {
        sources.push(cwd.join(".gzrun").join("config.toml"));
    }
    load_from_paths(&sources)
}

/// Load and merge settings from `paths`, in order.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<LauncherSettings, ConfigError> {
    let mut settings = LauncherSettings::default();

    for path in paths {
        match load_settings_file(path) {
            Ok(file_settings) => {
                tracing::debug!(event = "core.config.settings_loaded", path = %path.display());
                settings = merge_settings(settings, file_settings);
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
    }

    validate_settings(&settings)?;

    Ok(settings)
}

fn load_settings_file(path: &Path) -> Result<LauncherSettings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge two settings, with `override_settings` taking precedence field by field.
pub fn merge_settings(
    base: LauncherSettings,
    override_settings: LauncherSettings,
) -> LauncherSettings {
    LauncherSettings {
        launch: LaunchSettings {
            engine_config: override_settings
                .launch
                .engine_config
                .or(base.launch.engine_config),
            save_dir: override_settings.launch.save_dir.or(base.launch.save_dir),
        },
        console: ConsoleSettings {
            autoscroll_threshold: override_settings
                .console
                .autoscroll_threshold
                .or(base.console.autoscroll_threshold),
        },
    }
}

fn validate_settings(settings: &LauncherSettings) -> Result<(), ConfigError> {
    if let Some(threshold) = settings.console.autoscroll_threshold
        && !(threshold.is_finite() && threshold >= 0.0)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "console.autoscroll_threshold must be a non-negative number, got {}",
                threshold
            ),
        });
    }
    Ok(())
}
