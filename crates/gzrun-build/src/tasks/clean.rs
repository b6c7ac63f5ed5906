use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::pipeline::TaskError;

/// Remove the output directory and everything in it.
///
/// A directory that does not exist is already clean.
pub async fn run(out_dir: &Path) -> Result<(), TaskError> {
    match tokio::fs::remove_dir_all(out_dir).await {
        Ok(()) => {
            info!(event = "build.clean.removed", path = %out_dir.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(event = "build.clean.already_clean", path = %out_dir.display());
            Ok(())
        }
        Err(source) => Err(TaskError::RemoveFailed {
            path: out_dir.to_path_buf(),
            source,
        }),
    }
}
