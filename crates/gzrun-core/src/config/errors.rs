use std::path::PathBuf;

use crate::errors::GzrunError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to serialize launch config: {message}")]
    SerializeFailed { message: String },

    #[error("Failed to save launch config to '{}': {source}", .path.display())]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read '{}': {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse '{}': {message}", .path.display())]
    ParseFailed { path: PathBuf, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl GzrunError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::SerializeFailed { .. } => "CONFIG_SERIALIZE_FAILED",
            ConfigError::SaveFailed { .. } => "CONFIG_SAVE_FAILED",
            ConfigError::ReadFailed { .. } => "CONFIG_READ_FAILED",
            ConfigError::ParseFailed { .. } => "CONFIG_PARSE_FAILED",
            ConfigError::InvalidConfiguration { .. } => "CONFIG_INVALID",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ConfigError::ParseFailed { .. } | ConfigError::InvalidConfiguration { .. } => true,

            ConfigError::SerializeFailed { .. }
            | ConfigError::SaveFailed { .. }
            | ConfigError::ReadFailed { .. } => false,
        }
    }
}

impl ConfigError {
    /// Whether the underlying failure is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::ReadFailed { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_failed_display() {
        let error = ConfigError::SaveFailed {
            path: PathBuf::from("/ro/gzrun-config.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to save launch config to '/ro/gzrun-config.json': denied"
        );
        assert_eq!(error.error_code(), "CONFIG_SAVE_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_parse_failed_is_user_error() {
        let error = ConfigError::ParseFailed {
            path: PathBuf::from("config.toml"),
            message: "expected `=`".to_string(),
        };
        assert_eq!(error.error_code(), "CONFIG_PARSE_FAILED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_is_not_found() {
        let missing = ConfigError::ReadFailed {
            path: PathBuf::from("nope.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(missing.is_not_found());

        let denied = ConfigError::ReadFailed {
            path: PathBuf::from("nope.toml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!denied.is_not_found());
    }
}
