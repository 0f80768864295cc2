//! Error reporting shared by the queue, document, runner and CLI layers

/// An error that may carry a short message meant for the person running the CLI
///
/// Validation failures (zero capacity, unknown priority, malformed config)
/// return `Some`. I/O, spawn and panic failures return `None` and are reported
/// under the failing operation's name instead.
pub trait ContextualError: std::error::Error {
    fn user_message(&self) -> Option<&str>;

    fn is_user_actionable(&self) -> bool {
        self.user_message().is_some()
    }
}

/// The line reported for `error` when `operation` fails
pub fn headline<'a>(error: &'a dyn ContextualError, operation: &'a str) -> &'a str {
    error.user_message().unwrap_or(operation)
}

/// Log a failed operation as one `FATAL` line, with the full error at debug level
///
/// ```rust,no_run
/// # use utilkit::core::error_handling::log_error_with_context;
/// # use utilkit::queue::PriorityBoundedQueue;
/// if let Err(e) = PriorityBoundedQueue::<String>::new(0) {
///     // FATAL: Queue capacity must be greater than 0
///     log_error_with_context(&e, "Queue creation");
/// }
/// ```
pub fn log_error_with_context(error: &dyn ContextualError, operation: &str) {
    log::error!("FATAL: {}", headline(error, operation));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentError;
    use crate::queue::QueueError;
    use crate::runner::RunnerError;

    #[test]
    fn test_user_actionable_errors_carry_messages() {
        let errors: Vec<Box<dyn ContextualError>> = vec![
            Box::new(QueueError::InvalidCapacity { capacity: 0 }),
            Box::new(QueueError::InvalidPriority {
                value: "urgent".to_string(),
            }),
            Box::new(RunnerError::InvalidWorkers { workers: 0 }),
            Box::new(RunnerError::EmptyCommand),
        ];

        for error in &errors {
            assert!(error.is_user_actionable(), "{} should be actionable", error);
            assert!(error.user_message().is_some(), "{} needs a message", error);
        }
    }

    #[test]
    fn test_system_errors_use_generic_context() {
        let errors: Vec<Box<dyn ContextualError>> = vec![
            Box::new(RunnerError::TaskPanicked { index: 3 }),
            Box::new(RunnerError::Spawn {
                program: "missing".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Box::new(DocumentError::Io {
                path: "config.json".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }),
        ];

        for error in &errors {
            assert!(!error.is_user_actionable(), "{} should not be actionable", error);
            assert_eq!(error.user_message(), None);
        }
    }

    #[test]
    fn test_headline_prefers_user_message() {
        let invalid = QueueError::InvalidCapacity { capacity: 0 };
        assert_eq!(
            headline(&invalid, "Queue creation"),
            "Queue capacity must be greater than 0"
        );

        let panicked = RunnerError::TaskPanicked { index: 2 };
        assert_eq!(headline(&panicked, "run failed"), "run failed");
    }

    #[test]
    fn test_log_error_with_context_accepts_domain_errors() {
        log_error_with_context(&QueueError::MarkDoneUnderflow, "Completing message");
        log_error_with_context(&RunnerError::TaskPanicked { index: 0 }, "Running batch");
    }
}
