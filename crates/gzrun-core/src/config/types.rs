//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The user's current launch selection.
///
/// Serialized verbatim as a flat JSON object. Unset paths are written as
/// `null`, never omitted, so the persisted file always carries all three keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Program to run. `None` until the user picks a file.
    #[serde(rename = "gzdoomExecutablePath")]
    pub executable_path: Option<PathBuf>,

    /// Required primary data file. `None` until the user picks a file.
    #[serde(rename = "iwadPath")]
    pub base_path: Option<PathBuf>,

    /// Supplementary data files, in the order they were added.
    #[serde(rename = "externalFilePaths", default)]
    pub overlay_paths: Vec<PathBuf>,
}

impl LaunchConfig {
    /// An empty selection: no executable, no base data, no overlays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Launching is permitted only when both required paths are set.
    pub fn is_launchable(&self) -> bool {
        self.executable_path.is_some() && self.base_path.is_some()
    }

    pub fn executable_path(&self) -> Option<&Path> {
        self.executable_path.as_deref()
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    pub fn overlay_paths(&self) -> &[PathBuf] {
        &self.overlay_paths
    }
}

/// Settings loaded from the TOML hierarchy. Fixed for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LauncherSettings {
    #[serde(default)]
    pub launch: LaunchSettings,

    #[serde(default)]
    pub console: ConsoleSettings,
}

/// The two fixed paths handed to every launch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSettings {
    /// Value of the `-config` argument.
    /// Default: `~/.gzrun/gzdoom.ini`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_config: Option<PathBuf>,

    /// Value of the `-savedir` argument.
    /// Default: `~/.gzrun/saves/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<PathBuf>,
}

/// Console log tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Distance from the bottom, in pixels, within which the console keeps
    /// following new output.
    /// Default: 60.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscroll_threshold: Option<f32>,
}

impl LauncherSettings {
    pub fn engine_config(&self) -> PathBuf {
        self.launch
            .engine_config
            .clone()
            .unwrap_or_else(super::defaults::default_engine_config)
    }

    pub fn save_dir(&self) -> PathBuf {
        self.launch
            .save_dir
            .clone()
            .unwrap_or_else(super::defaults::default_save_dir)
    }

    pub fn autoscroll_threshold(&self) -> f32 {
        self.console
            .autoscroll_threshold
            .unwrap_or(crate::console::AUTOSCROLL_THRESHOLD_PX)
    }
}
