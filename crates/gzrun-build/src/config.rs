//! Build settings from `gzrun-build.toml`.
//!
//! The file is optional; every field has a default matching the stock
//! project layout:
//!
//! ```toml
//! [paths]
//! out_dir = "dist"
//! client_dir = "src/client"
//! backend_dir = "src"
//!
//! [compiler]
//! program = "./node_modules/.bin/tsc"
//!
//! [manifest]
//! main = "main.js"
//! start = "electron ./"
//!
//! [serve]
//! host = "127.0.0.1"
//! port = 3000
//! start_delay_ms = 5000
//! ```

use std::fs;
use std::net::IpAddr;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use gzrun_core::errors::GzrunError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const BUILD_CONFIG_FILE: &str = "gzrun-build.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub serve: ServeConfig,
}

/// Locations relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Client tree: markup, stylesheet and its own compiler project.
    #[serde(default = "default_client_dir")]
    pub client_dir: PathBuf,
    /// Backend compiler project.
    #[serde(default = "default_backend_dir")]
    pub backend_dir: PathBuf,
    #[serde(default = "default_markup")]
    pub markup: String,
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Program path (resolved against the root when relative) or a bare name
    /// looked up on `PATH`.
    #[serde(default = "default_compiler")]
    pub program: String,
}

/// Values written into the packaged `package.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default = "default_main")]
    pub main: String,
    #[serde(default = "default_start")]
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Must be a loopback address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Preferred port; the next free one is used when busy.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_client_dir() -> PathBuf {
    PathBuf::from("src/client")
}

fn default_backend_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_markup() -> String {
    "index.html".to_string()
}

fn default_stylesheet() -> String {
    "style.css".to_string()
}

fn default_compiler() -> String {
    "./node_modules/.bin/tsc".to_string()
}

fn default_main() -> String {
    "main.js".to_string()
}

fn default_start() -> String {
    "electron ./".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_start_delay_ms() -> u64 {
    5000
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            client_dir: default_client_dir(),
            backend_dir: default_backend_dir(),
            markup: default_markup(),
            stylesheet: default_stylesheet(),
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_compiler(),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            main: default_main(),
            start: default_start(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            start_delay_ms: default_start_delay_ms(),
        }
    }
}

impl ServeConfig {
    /// The configured host as an address. Only valid after [`BuildConfig::validate`].
    pub fn ip(&self) -> Result<IpAddr, BuildConfigError> {
        self.host
            .parse::<IpAddr>()
            .map_err(|_| BuildConfigError::InvalidHost {
                host: self.host.clone(),
            })
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildConfigError {
    #[error("Failed to read build settings '{}': {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse build settings '{}': {message}", .path.display())]
    ParseFailed { path: PathBuf, message: String },

    #[error("Invalid serve host '{host}': expected an IP address")]
    InvalidHost { host: String },

    #[error("Serve host '{host}' is not a loopback address")]
    NonLoopbackHost { host: String },

    #[error(
        "Output directory '{}' must be a relative path below the project root",
        .path.display()
    )]
    UnsafeOutDir { path: PathBuf },

    #[error("Invalid build settings: {message}")]
    Invalid { message: String },
}

impl GzrunError for BuildConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            BuildConfigError::ReadFailed { .. } => "BUILD_CONFIG_READ_FAILED",
            BuildConfigError::ParseFailed { .. } => "BUILD_CONFIG_PARSE_FAILED",
            BuildConfigError::InvalidHost { .. } => "BUILD_CONFIG_INVALID_HOST",
            BuildConfigError::NonLoopbackHost { .. } => "BUILD_CONFIG_NON_LOOPBACK_HOST",
            BuildConfigError::UnsafeOutDir { .. } => "BUILD_CONFIG_UNSAFE_OUT_DIR",
            BuildConfigError::Invalid { .. } => "BUILD_CONFIG_INVALID",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, BuildConfigError::ReadFailed { .. })
    }
}

impl BuildConfig {
    /// Load settings for a project.
    ///
    /// With `explicit` set, that file must exist. Otherwise
    /// `<root>/gzrun-build.toml` is read when present and defaults are used
    /// when it is not.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, BuildConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (root.join(BUILD_CONFIG_FILE), false),
        };

        let config = match fs::read_to_string(&path) {
            Ok(content) => {
                let config: BuildConfig =
                    toml::from_str(&content).map_err(|e| BuildConfigError::ParseFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                info!(event = "build.config.loaded", path = %path.display());
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                debug!(event = "build.config.defaults_used", path = %path.display());
                BuildConfig::default()
            }
            Err(source) => return Err(BuildConfigError::ReadFailed { path, source }),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BuildConfigError> {
        let ip = self.serve.ip()?;
        if !ip.is_loopback() {
            return Err(BuildConfigError::NonLoopbackHost {
                host: self.serve.host.clone(),
            });
        }
        if self.compiler.program.trim().is_empty() {
            return Err(BuildConfigError::Invalid {
                message: "compiler.program must not be empty".to_string(),
            });
        }
        if self.paths.out_dir.as_os_str().is_empty() {
            return Err(BuildConfigError::Invalid {
                message: "paths.out_dir must not be empty".to_string(),
            });
        }
        if !is_contained(&self.paths.out_dir) {
            return Err(BuildConfigError::UnsafeOutDir {
                path: self.paths.out_dir.clone(),
            });
        }
        Ok(())
    }
}

/// Only plain components, so the path stays strictly below the project root.
fn is_contained(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_stock_layout() {
        let config = BuildConfig::default();
        assert_eq!(config.paths.out_dir, PathBuf::from("dist"));
        assert_eq!(config.paths.client_dir, PathBuf::from("src/client"));
        assert_eq!(config.paths.backend_dir, PathBuf::from("src"));
        assert_eq!(config.compiler.program, "./node_modules/.bin/tsc");
        assert_eq!(config.manifest.main, "main.js");
        assert_eq!(config.manifest.start, "electron ./");
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.serve.start_delay(), Duration::from_millis(5000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::load(dir.path(), None).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = BuildConfig::load(dir.path(), Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.error_code(), "BUILD_CONFIG_READ_FAILED");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(BUILD_CONFIG_FILE),
            "[manifest]\nmain = \"app.js\"\n\n[serve]\nport = 8080\n",
        )
        .unwrap();

        let config = BuildConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.manifest.main, "app.js");
        assert_eq!(config.manifest.start, "electron ./");
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.start_delay_ms, 5000);
        assert_eq!(config.paths.out_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BUILD_CONFIG_FILE), "[serve\nport = ").unwrap();

        let err = BuildConfig::load(dir.path(), None).unwrap_err();
        assert!(matches!(err, BuildConfigError::ParseFailed { .. }));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_non_loopback_host_is_rejected() {
        let mut config = BuildConfig::default();
        config.serve.host = "0.0.0.0".to_string();
        assert!(matches!(
            config.validate(),
            Err(BuildConfigError::NonLoopbackHost { .. })
        ));

        config.serve.host = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(BuildConfigError::InvalidHost { .. })
        ));

        config.serve.host = "::1".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_dir_outside_project_is_rejected() {
        for out_dir in [".", "..", "/", "/tmp/dist", "dist/../..", "./dist", "dist/.."] {
            let mut config = BuildConfig::default();
            config.paths.out_dir = PathBuf::from(out_dir);
            let err = config.validate().unwrap_err();
            assert_eq!(err.error_code(), "BUILD_CONFIG_UNSAFE_OUT_DIR", "{out_dir}");
            assert!(err.is_user_error());
        }
    }

    #[test]
    fn test_empty_out_dir_is_rejected() {
        let mut config = BuildConfig::default();
        config.paths.out_dir = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(BuildConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_nested_out_dir_is_accepted() {
        let mut config = BuildConfig::default();
        config.paths.out_dir = PathBuf::from("build/out");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_project_root_as_out_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BUILD_CONFIG_FILE), "[paths]\nout_dir = \".\"\n").unwrap();

        let err = BuildConfig::load(dir.path(), None).unwrap_err();
        assert!(matches!(err, BuildConfigError::UnsafeOutDir { .. }));
    }
}
