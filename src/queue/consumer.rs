//! Queue Consumer for processing messages
//!
//! Consumers take messages from a shared [`PriorityBoundedQueue`]. Every
//! message is delivered to exactly one consumer, wrapped in a [`Delivery`]
//! whose completion performs the queue's `mark_done` accounting.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::internal::PriorityBoundedQueue;
use crate::queue::message::Message;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Consumer handle for reading messages from a queue
///
/// # Example
///
/// ```rust
/// # use utilkit::queue::{Message, PriorityBoundedQueue};
/// # use std::sync::Arc;
/// # use std::time::Duration;
/// let queue = Arc::new(PriorityBoundedQueue::new(16).unwrap());
/// queue.put(Message::new("job-1", 7u32));
///
/// let consumer = queue.create_consumer("worker-1");
/// while let Some(delivery) = consumer.receive(Some(Duration::ZERO)).unwrap() {
///     println!("Processing: {}", delivery.message().content());
///     delivery.complete().unwrap();
/// }
/// queue.wait_all();
/// ```
pub struct QueueConsumer<T> {
    consumer_id: String,
    queue: Weak<PriorityBoundedQueue<T>>,
}

impl<T> QueueConsumer<T> {
    pub(crate) fn new(consumer_id: String, queue: Weak<PriorityBoundedQueue<T>>) -> Self {
        Self { consumer_id, queue }
    }

    pub fn consumer_id(&self) -> &str {
        &self.consumer_id
    }

    /// Take the next message, waiting according to `timeout` (see
    /// [`PriorityBoundedQueue::get`])
    pub fn receive(&self, timeout: Option<Duration>) -> QueueResult<Option<Delivery<T>>> {
        let queue = self.queue.upgrade().ok_or(QueueError::QueueDropped)?;

        Ok(queue.get(timeout).map(|message| {
            log::trace!(
                "Consumer '{}' received message '{}'",
                self.consumer_id,
                message.id()
            );
            Delivery {
                guard: CompletionGuard {
                    queue,
                    consumer_id: self.consumer_id.clone(),
                    message_id: message.id().to_string(),
                    pending: true,
                },
                message,
            }
        }))
    }

    /// Take up to `max` messages without blocking
    pub fn receive_batch(&self, max: usize) -> QueueResult<Vec<Delivery<T>>> {
        let mut batch = Vec::with_capacity(max);

        for _ in 0..max {
            match self.receive(Some(Duration::ZERO))? {
                Some(delivery) => batch.push(delivery),
                None => break,
            }
        }

        Ok(batch)
    }
}

impl<T> Clone for QueueConsumer<T> {
    fn clone(&self) -> Self {
        Self {
            consumer_id: self.consumer_id.clone(),
            queue: self.queue.clone(),
        }
    }
}

/// A dequeued message awaiting completion
///
/// Call [`complete`](Self::complete) once processing has finished. Dropping
/// a delivery without completing it leaves the queue's unfinished counter
/// untouched (so `wait_all` keeps waiting) and logs a warning.
pub struct Delivery<T> {
    message: Message<T>,
    guard: CompletionGuard<T>,
}

impl<T> Delivery<T> {
    pub fn message(&self) -> &Message<T> {
        &self.message
    }

    /// Report the message as processed and return it
    pub fn complete(self) -> QueueResult<Message<T>> {
        let Delivery { message, mut guard } = self;
        guard.pending = false;
        guard.queue.mark_done()?;
        Ok(message)
    }
}

/// Warns when a delivery goes out of scope before completion
struct CompletionGuard<T> {
    queue: Arc<PriorityBoundedQueue<T>>,
    consumer_id: String,
    message_id: String,
    pending: bool,
}

impl<T> Drop for CompletionGuard<T> {
    fn drop(&mut self) {
        if self.pending {
            log::warn!(
                "Consumer '{}' dropped message '{}' without completing it",
                self.consumer_id,
                self.message_id
            );
        }
    }
}
