use std::path::PathBuf;

use crate::errors::GzrunError;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("No engine executable selected")]
    MissingExecutable,

    #[error("No IWAD selected")]
    MissingBaseData,

    #[error("Failed to start '{}': {source}", .program.display())]
    SpawnFailed {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Standard output of '{}' was not captured", .program.display())]
    StdoutUnavailable { program: PathBuf },

    #[error("Failed to start output reader for '{}': {source}", .program.display())]
    ReaderFailed {
        program: PathBuf,
        source: std::io::Error,
    },
}

impl GzrunError for LaunchError {
    fn error_code(&self) -> &'static str {
        match self {
            LaunchError::MissingExecutable => "LAUNCH_MISSING_EXECUTABLE",
            LaunchError::MissingBaseData => "LAUNCH_MISSING_BASE_DATA",
            LaunchError::SpawnFailed { .. } => "LAUNCH_SPAWN_FAILED",
            LaunchError::StdoutUnavailable { .. } => "LAUNCH_STDOUT_UNAVAILABLE",
            LaunchError::ReaderFailed { .. } => "LAUNCH_READER_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            LaunchError::MissingExecutable
            | LaunchError::MissingBaseData
            | LaunchError::SpawnFailed { .. } => true,

            LaunchError::StdoutUnavailable { .. } | LaunchError::ReaderFailed { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_display() {
        let error = LaunchError::MissingExecutable;
        assert_eq!(error.to_string(), "No engine executable selected");
        assert_eq!(error.error_code(), "LAUNCH_MISSING_EXECUTABLE");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_spawn_failed_display() {
        let error = LaunchError::SpawnFailed {
            program: PathBuf::from("/bin/game"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "Failed to start '/bin/game': not found");
        assert_eq!(error.error_code(), "LAUNCH_SPAWN_FAILED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_stdout_unavailable_is_system_error() {
        let error = LaunchError::StdoutUnavailable {
            program: PathBuf::from("/bin/game"),
        };
        assert_eq!(error.error_code(), "LAUNCH_STDOUT_UNAVAILABLE");
        assert!(!error.is_user_error());
    }
}
