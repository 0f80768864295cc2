//! Message Types for the Priority Mailbox
//!
//! This module defines the immutable message value carried through the queue
//! and the closed set of priority levels that decide dequeue order.

use crate::queue::error::{QueueError, QueueResult};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Delivery priority of a message
///
/// Discriminants follow dequeue order: the smallest rank is served first, so
/// the derived `Ord` already sorts `High < Normal < Low`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    High = 0,
    #[default]
    Normal = 1,
    Low = 2,
}

impl Priority {
    /// Ordering rank used in the composite queue key (0 is served first)
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Parse a priority name, reporting unknown names as a queue error
    pub fn parse(value: &str) -> QueueResult<Self> {
        value
            .trim()
            .parse::<Priority>()
            .map_err(|_| QueueError::InvalidPriority {
                value: value.to_string(),
            })
    }
}

impl TryFrom<u8> for Priority {
    type Error = QueueError;

    fn try_from(value: u8) -> QueueResult<Self> {
        match value {
            0 => Ok(Priority::High),
            1 => Ok(Priority::Normal),
            2 => Ok(Priority::Low),
            other => Err(QueueError::InvalidPriority {
                value: other.to_string(),
            }),
        }
    }
}

/// Message accepted by a [`PriorityBoundedQueue`](crate::queue::PriorityBoundedQueue)
///
/// The identifier is chosen by the producer and is not checked for
/// uniqueness. The timestamp is captured at construction unless supplied
/// explicitly with [`Message::with_timestamp`].
///
/// # Example
///
/// ```rust
/// use utilkit::queue::{Message, Priority};
///
/// let message = Message::new("job-1", "rebuild index".to_string())
///     .with_priority(Priority::High);
/// assert_eq!(message.priority(), Priority::High);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message<T> {
    id: String,
    content: T,
    priority: Priority,
    timestamp: SystemTime,
}

impl<T> Message<T> {
    pub fn new(id: impl Into<String>, content: T) -> Self {
        Self {
            id: id.into(),
            content,
            priority: Priority::default(),
            timestamp: SystemTime::now(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Consume the message and return its payload
    pub fn into_content(self) -> T {
        self.content
    }
}
