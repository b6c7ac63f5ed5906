use std::ffi::OsString;
use std::path::PathBuf;

use super::errors::LaunchError;
use crate::config::{LaunchConfig, LauncherSettings};

pub const CONFIG_FLAG: &str = "-config";
pub const SAVEDIR_FLAG: &str = "-savedir";
pub const BASE_DATA_FLAG: &str = "-iwad";
pub const OVERLAY_FLAG: &str = "-file";

/// A fully resolved program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl LaunchPlan {
    /// Build the invocation for the current selection.
    ///
    /// Arguments come in flag/value pairs, in fixed order:
    /// `-config <engine config> -savedir <save dir> -iwad <base>`, followed by
    /// one `-file <overlay>` pair per overlay in insertion order. Values are
    /// passed verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::MissingExecutable`] or [`LaunchError::MissingBaseData`]
    /// when a required path is unset.
    pub fn build(config: &LaunchConfig, settings: &LauncherSettings) -> Result<Self, LaunchError> {
        let program = config
            .executable_path
            .clone()
            .ok_or(LaunchError::MissingExecutable)?;
        let base_path = config
            .base_path
            .as_ref()
            .ok_or(LaunchError::MissingBaseData)?;

        let mut args: Vec<OsString> = Vec::with_capacity(6 + config.overlay_paths.len() * 2);
        args.push(CONFIG_FLAG.into());
        args.push(settings.engine_config().into_os_string());
        args.push(SAVEDIR_FLAG.into());
        args.push(settings.save_dir().into_os_string());
        args.push(BASE_DATA_FLAG.into());
        args.push(base_path.clone().into_os_string());

        for overlay in &config.overlay_paths {
            args.push(OVERLAY_FLAG.into());
            args.push(overlay.clone().into_os_string());
        }

        Ok(Self { program, args })
    }

    /// Arguments rendered for logs and display.
    pub fn display_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}
