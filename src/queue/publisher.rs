//! Queue Publisher for sending messages
//!
//! Publishers put messages into a shared [`PriorityBoundedQueue`]. Each
//! publisher is identified by a producer_id that is used in log output.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::internal::PriorityBoundedQueue;
use crate::queue::message::{Message, Priority};
use std::sync::Weak;

/// Publisher handle for sending messages to a queue
///
/// The handle holds only a weak reference, so it never keeps a queue alive
/// on its own. Backpressure is reported as `Ok(false)`; the only error is
/// [`QueueError::QueueDropped`].
///
/// # Example
///
/// ```rust
/// # use utilkit::queue::{Message, PriorityBoundedQueue};
/// # use std::sync::Arc;
/// let queue = Arc::new(PriorityBoundedQueue::new(16).unwrap());
/// let publisher = queue.create_publisher("indexer");
///
/// let accepted = publisher.publish(Message::new("job-1", "payload")).unwrap();
/// assert!(accepted);
/// ```
pub struct QueuePublisher<T> {
    producer_id: String,
    queue: Weak<PriorityBoundedQueue<T>>,
}

impl<T> QueuePublisher<T> {
    pub(crate) fn new(producer_id: String, queue: Weak<PriorityBoundedQueue<T>>) -> Self {
        Self { producer_id, queue }
    }

    pub fn producer_id(&self) -> &str {
        &self.producer_id
    }

    /// Put a message into the queue, returning whether it was accepted
    pub fn publish(&self, message: Message<T>) -> QueueResult<bool> {
        let queue = self.queue.upgrade().ok_or(QueueError::QueueDropped)?;

        let id = message.id().to_string();
        let accepted = queue.put(message);
        if !accepted {
            log::debug!(
                "Producer '{}' hit backpressure publishing '{}'",
                self.producer_id,
                id
            );
        }
        Ok(accepted)
    }

    /// Build and publish a message in one step
    pub fn publish_with(
        &self,
        id: impl Into<String>,
        content: T,
        priority: Priority,
    ) -> QueueResult<bool> {
        self.publish(Message::new(id, content).with_priority(priority))
    }
}

impl<T> Clone for QueuePublisher<T> {
    fn clone(&self) -> Self {
        Self {
            producer_id: self.producer_id.clone(),
            queue: self.queue.clone(),
        }
    }
}
