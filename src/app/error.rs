//! Application Error Types

use crate::core::error_handling::ContextualError;
use crate::document::DocumentError;
use crate::queue::QueueError;
use crate::runner::RunnerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("Failed to initialise logging: {reason}")]
    Logging { reason: String },

    #[error("Failed to read standard input: {0}")]
    Input(#[from] std::io::Error),

    #[error("Config key '{key}' is not set")]
    MissingKey { key: String },

    #[error("Worker thread '{name}' panicked")]
    WorkerPanicked { name: String },

    #[error("{failed} of {total} commands failed")]
    CommandsFailed { failed: usize, total: usize },
}

/// Result type for application commands
pub type AppResult<T> = Result<T, AppError>;

impl ContextualError for AppError {
    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Queue(e) => e.user_message(),
            AppError::Document(e) => e.user_message(),
            AppError::Runner(e) => e.user_message(),
            AppError::MissingKey { .. } => Some("Requested config key is not set"),
            AppError::CommandsFailed { .. } => Some("One or more commands failed"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegates_to_domain_errors() {
        let error = AppError::from(QueueError::InvalidCapacity { capacity: 0 });
        assert!(error.is_user_actionable());
        assert_eq!(
            error.user_message(),
            Some("Queue capacity must be greater than 0")
        );

        let error = AppError::from(RunnerError::TaskPanicked { index: 1 });
        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
    }

    #[test]
    fn test_transparent_display() {
        let error = AppError::from(DocumentError::NoBackingFile);
        assert_eq!(error.to_string(), "Config document has no backing file");
    }
}
