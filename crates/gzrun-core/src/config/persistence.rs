use std::path::Path;

use super::errors::ConfigError;
use super::types::LaunchConfig;

/// File name of the persisted launch selection, relative to the working directory.
pub const CONFIG_FILE_NAME: &str = "gzrun-config.json";

/// Write the launch selection to `path` as a compact JSON object.
///
/// Overwrites any existing file; nothing is merged.
pub fn save_launch_config(config: &LaunchConfig, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string(config).map_err(|e| ConfigError::SerializeFailed {
        message: e.to_string(),
    })?;

    std::fs::write(path, json).map_err(|source| {
        tracing::error!(
            event = "core.config.save_failed",
            path = %path.display(),
            error = %source
        );
        ConfigError::SaveFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(
        event = "core.config.saved",
        path = %path.display(),
        overlay_count = config.overlay_paths.len()
    );

    Ok(())
}

/// Read a launch selection previously written by [`save_launch_config`].
pub fn load_launch_config(path: &Path) -> Result<LaunchConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let config = serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(event = "core.config.loaded", path = %path.display());

    Ok(config)
}
