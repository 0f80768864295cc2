//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for complete usage examples and architecture details.

// Core queue
pub use crate::queue::internal::{PriorityBoundedQueue, DEFAULT_CAPACITY};

// Producer and consumer handles
pub use crate::queue::consumer::{Delivery, QueueConsumer};
pub use crate::queue::publisher::QueuePublisher;

// Message types
pub use crate::queue::message::{Message, Priority};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Statistics
pub use crate::queue::types::QueueStats;
