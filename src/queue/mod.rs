//! Priority Mailbox Component
//!
//! A bounded, thread-safe message queue that orders messages by priority and
//! arrival, tracks completion, and supports blocking consumption with timeout.
//!
//! # Overview
//!
//! - **Priority Ordering**: HIGH before NORMAL before LOW, then earliest
//!   timestamp, then earliest sequence number
//! - **Backpressure**: `put` never blocks; a full queue returns `false`
//! - **Single Delivery**: each message is handed to exactly one consumer
//! - **Completion Tracking**: `mark_done` / `wait_all` synchronise producers
//!   with full drain-and-process completion
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │
//! └──────┬───────┘     └──────┬───────┘
//!        │ put (non-blocking) │
//!        ▼                    ▼
//! ┌─────────────────────────────────────────────┐
//! │            PriorityBoundedQueue             │
//! │  Mutex ─┬─ min-heap (rank, timestamp, seq)  │
//! │         ├─ next sequence                    │
//! │         └─ unfinished count ──► wait_all    │
//! └──────────────┬──────────────────────────────┘
//!                │ get (blocking / timeout)
//!        ┌───────┴────────┐
//!        ▼                ▼
//! ┌────────────┐   ┌────────────┐
//! │ Consumer 1 │   │ Consumer 2 │ ── mark_done ──► unfinished - 1
//! └────────────┘   └────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::thread;
//! use utilkit::queue::{Message, Priority, PriorityBoundedQueue};
//!
//! let queue = Arc::new(PriorityBoundedQueue::new(100).unwrap());
//!
//! let worker = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         while let Some(message) = queue.get(None) {
//!             println!("Received: {}", message.content());
//!             queue.mark_done().unwrap();
//!         }
//!     })
//! };
//!
//! queue.put(Message::new("a", "routine".to_string()));
//! queue.put(Message::new("b", "urgent".to_string()).with_priority(Priority::High));
//!
//! queue.wait_all();
//! queue.close();
//! worker.join().unwrap();
//! ```

pub mod api;
mod consumer;
mod error;
mod internal;
mod message;
mod publisher;
mod types;

pub use consumer::{Delivery, QueueConsumer};
pub use error::{QueueError, QueueResult};
pub use internal::{PriorityBoundedQueue, DEFAULT_CAPACITY};
pub use message::{Message, Priority};
pub use publisher::QueuePublisher;
pub use types::QueueStats;

#[cfg(test)]
mod tests;
