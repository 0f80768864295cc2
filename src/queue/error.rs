//! Queue Error Types
//!
//! Only caller misuse is reported through these errors. A full queue and an
//! expired `get` timeout are ordinary outcomes and are returned as `false` /
//! `None` by the queue operations themselves.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid queue capacity: {capacity} (must be greater than 0)")]
    InvalidCapacity { capacity: usize },

    #[error("Invalid message priority: '{value}' (expected high, normal or low)")]
    InvalidPriority { value: String },

    #[error("mark_done called more times than messages were accepted")]
    MarkDoneUnderflow,

    #[error("Queue no longer exists")]
    QueueDropped,
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

impl crate::core::error_handling::ContextualError for QueueError {
    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::InvalidCapacity { .. } => Some("Queue capacity must be greater than 0"),
            QueueError::InvalidPriority { .. } => {
                Some("Message priority must be one of: high, normal, low")
            }
            _ => None,
        }
    }
}
