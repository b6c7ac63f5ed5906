use std::path::{Path, PathBuf};

use tracing::info;

use crate::pipeline::TaskError;

/// Copy `source` byte-for-byte into `dest_dir`, keeping its file name.
///
/// `dest_dir` is created when missing. Returns the written path.
pub async fn copy_into(source: &Path, dest_dir: &Path) -> Result<PathBuf, TaskError> {
    let file_name = source.file_name().ok_or_else(|| TaskError::CopyFailed {
        from: source.to_path_buf(),
        to: dest_dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "source has no file name"),
    })?;
    let dest = dest_dir.join(file_name);

    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(|source| TaskError::CreateDirFailed {
            path: dest_dir.to_path_buf(),
            source,
        })?;

    let bytes = tokio::fs::copy(source, &dest)
        .await
        .map_err(|e| TaskError::CopyFailed {
            from: source.to_path_buf(),
            to: dest.clone(),
            source: e,
        })?;

    info!(
        event = "build.assets.copied",
        from = %source.display(),
        to = %dest.display(),
        bytes = bytes
    );

    Ok(dest)
}
