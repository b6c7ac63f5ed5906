use std::net::SocketAddr;
use std::path::PathBuf;

use gzrun_core::errors::GzrunError;

/// Failure of the task graph or the run as a whole.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Unknown task '{name}'")]
    UnknownTask { name: String },

    #[error("Task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("Task '{name}' is defined twice")]
    DuplicateTask { name: String },

    #[error("Dependency cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("Task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        #[source]
        source: TaskError,
    },

    #[error("Task runner failed: {message}")]
    Join { message: String },
}

impl GzrunError for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            PipelineError::UnknownTask { .. } => "PIPELINE_UNKNOWN_TASK",
            PipelineError::UnknownDependency { .. } => "PIPELINE_UNKNOWN_DEPENDENCY",
            PipelineError::DuplicateTask { .. } => "PIPELINE_DUPLICATE_TASK",
            PipelineError::Cycle { .. } => "PIPELINE_CYCLE",
            PipelineError::TaskFailed { .. } => "PIPELINE_TASK_FAILED",
            PipelineError::Join { .. } => "PIPELINE_JOIN_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            PipelineError::UnknownTask { .. } => true,
            PipelineError::TaskFailed { source, .. } => source.is_user_error(),
            PipelineError::UnknownDependency { .. }
            | PipelineError::DuplicateTask { .. }
            | PipelineError::Cycle { .. }
            | PipelineError::Join { .. } => false,
        }
    }
}

/// Failure inside a single task action.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Failed to remove '{}': {source}", .path.display())]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory '{}': {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy '{}' to '{}': {source}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read manifest '{}': {source}", .path.display())]
    ManifestReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest '{}': {message}", .path.display())]
    ManifestParseFailed { path: PathBuf, message: String },

    #[error("Manifest '{}' is not a JSON object", .path.display())]
    ManifestNotObject { path: PathBuf },

    #[error("Failed to write manifest '{}': {source}", .path.display())]
    ManifestWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Compiler '{program}' not found")]
    CompilerNotFound { program: String },

    #[error("Failed to start compiler '{}': {source}", .program.display())]
    CompilerSpawnFailed {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed waiting for compiler '{}': {source}", .program.display())]
    CompilerWaitFailed {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to watch '{}': {message}", .path.display())]
    WatchFailed { path: PathBuf, message: String },

    #[error("Invalid watch pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to bind dev server on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("No free port found starting at {port}")]
    NoFreePort { port: u16 },

    #[error("Dev server stopped: {message}")]
    ServeFailed { message: String },

    #[error("Invalid dev server settings: {message}")]
    ServeConfigInvalid { message: String },

    #[error("Task panicked: {message}")]
    Panicked { message: String },
}

impl GzrunError for TaskError {
    fn error_code(&self) -> &'static str {
        match self {
            TaskError::RemoveFailed { .. } => "TASK_REMOVE_FAILED",
            TaskError::CreateDirFailed { .. } => "TASK_CREATE_DIR_FAILED",
            TaskError::CopyFailed { .. } => "TASK_COPY_FAILED",
            TaskError::ManifestReadFailed { .. } => "TASK_MANIFEST_READ_FAILED",
            TaskError::ManifestParseFailed { .. } => "TASK_MANIFEST_PARSE_FAILED",
            TaskError::ManifestNotObject { .. } => "TASK_MANIFEST_NOT_OBJECT",
            TaskError::ManifestWriteFailed { .. } => "TASK_MANIFEST_WRITE_FAILED",
            TaskError::CompilerNotFound { .. } => "TASK_COMPILER_NOT_FOUND",
            TaskError::CompilerSpawnFailed { .. } => "TASK_COMPILER_SPAWN_FAILED",
            TaskError::CompilerWaitFailed { .. } => "TASK_COMPILER_WAIT_FAILED",
            TaskError::WatchFailed { .. } => "TASK_WATCH_FAILED",
            TaskError::InvalidPattern { .. } => "TASK_INVALID_PATTERN",
            TaskError::BindFailed { .. } => "TASK_BIND_FAILED",
            TaskError::NoFreePort { .. } => "TASK_NO_FREE_PORT",
            TaskError::ServeFailed { .. } => "TASK_SERVE_FAILED",
            TaskError::ServeConfigInvalid { .. } => "TASK_SERVE_CONFIG_INVALID",
            TaskError::Panicked { .. } => "TASK_PANICKED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            TaskError::ManifestReadFailed { .. }
                | TaskError::ManifestParseFailed { .. }
                | TaskError::ManifestNotObject { .. }
                | TaskError::CompilerNotFound { .. }
                | TaskError::CompilerSpawnFailed { .. }
                | TaskError::CopyFailed { .. }
                | TaskError::ServeConfigInvalid { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let error = PipelineError::Cycle {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(error.to_string(), "Dependency cycle: a -> b -> a");
        assert_eq!(error.error_code(), "PIPELINE_CYCLE");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_unknown_task_is_user_error() {
        let error = PipelineError::UnknownTask {
            name: "deploy".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown task 'deploy'");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_task_failed_wraps_source() {
        let error = PipelineError::TaskFailed {
            task: "scaffolding".to_string(),
            source: TaskError::ManifestNotObject {
                path: PathBuf::from("package.json"),
            },
        };
        assert_eq!(
            error.to_string(),
            "Task 'scaffolding' failed: Manifest 'package.json' is not a JSON object"
        );
        assert!(error.is_user_error());
    }
}
