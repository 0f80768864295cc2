//! Runner Error Types

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Invalid worker count: {workers} (must be greater than 0)")]
    InvalidWorkers { workers: usize },

    #[error("Command specification is empty")]
    EmptyCommand,

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Task {index} panicked or was cancelled")]
    TaskPanicked { index: usize },
}

/// Result type for runner operations
pub type RunnerResult<T> = Result<T, RunnerError>;

impl crate::core::error_handling::ContextualError for RunnerError {
    fn user_message(&self) -> Option<&str> {
        match self {
            RunnerError::InvalidWorkers { .. } => Some("Worker count must be greater than 0"),
            RunnerError::EmptyCommand => Some("At least one program name is required per command"),
            _ => None,
        }
    }
}
