use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::config::ManifestConfig;
use crate::pipeline::TaskError;

pub const MANIFEST_FILE: &str = "package.json";

/// Rewrite a project manifest into its packaged form.
///
/// `devDependencies` is dropped, `main` is set and `scripts` is replaced by a
/// single `start` entry. Every other key is kept in its original position.
pub fn derive_manifest(manifest: Map<String, Value>, config: &ManifestConfig) -> Map<String, Value> {
    let mut packaged: Map<String, Value> = manifest
        .into_iter()
        .filter(|(key, _)| key != "devDependencies")
        .collect();

    packaged.insert("main".to_string(), Value::String(config.main.clone()));

    let mut scripts = Map::new();
    scripts.insert("start".to_string(), Value::String(config.start.clone()));
    packaged.insert("scripts".to_string(), Value::Object(scripts));

    packaged
}

/// Read `<root>/package.json` and write the derived manifest to
/// `<out>/package.json`, pretty-printed with two-space indentation.
pub async fn run(source: &Path, out_dir: &Path, config: &ManifestConfig) -> Result<(), TaskError> {
    let content =
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| TaskError::ManifestReadFailed {
                path: source.to_path_buf(),
                source: e,
            })?;

    let value: Value =
        serde_json::from_str(&content).map_err(|e| TaskError::ManifestParseFailed {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;
    let Value::Object(manifest) = value else {
        return Err(TaskError::ManifestNotObject {
            path: source.to_path_buf(),
        });
    };

    let packaged = derive_manifest(manifest, config);
    let rendered = serde_json::to_string_pretty(&Value::Object(packaged)).map_err(|e| {
        TaskError::ManifestParseFailed {
            path: source.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| TaskError::CreateDirFailed {
            path: out_dir.to_path_buf(),
            source: e,
        })?;

    let dest: PathBuf = out_dir.join(MANIFEST_FILE);
    tokio::fs::write(&dest, rendered)
        .await
        .map_err(|e| TaskError::ManifestWriteFailed {
            path: dest.clone(),
            source: e,
        })?;

    info!(event = "build.scaffolding.manifest_written", path = %dest.display());
    Ok(())
}
