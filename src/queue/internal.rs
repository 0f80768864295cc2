//! Internal PriorityBoundedQueue implementation with composite-key ordering
//!
//! This module provides the core queue functionality with:
//! - Priority ordering over the composite key (rank, timestamp, sequence)
//! - A fixed capacity enforced atomically with insertion
//! - Blocking consumption with optional timeout
//! - Completion tracking for drain synchronisation

use crate::core::sync::{lock_or_recover, wait_or_recover, wait_timeout_or_recover};
use crate::queue::consumer::QueueConsumer;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::Message;
use crate::queue::publisher::QueuePublisher;
use crate::queue::types::QueueStats;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant, SystemTime};

/// Capacity used by [`PriorityBoundedQueue::default`]
pub const DEFAULT_CAPACITY: usize = 10_000;

const LOCK_CONTEXT: &str = "PriorityBoundedQueue";

/// Internal queue entry keyed by (priority rank, timestamp, sequence)
///
/// The sequence is unique per queue, so no two entries ever compare equal.
struct QueueEntry<T> {
    rank: u8,
    timestamp: SystemTime,
    sequence: u64,
    message: Message<T>,
}

impl<T> QueueEntry<T> {
    fn new(sequence: u64, message: Message<T>) -> Self {
        Self {
            rank: message.priority().rank(),
            timestamp: message.timestamp(),
            sequence,
            message,
        }
    }

    fn key(&self) -> (u8, SystemTime, u64) {
        (self.rank, self.timestamp, self.sequence)
    }
}

impl<T> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for QueueEntry<T> {}

impl<T> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// All mutable queue state, guarded by a single mutex
struct QueueState<T> {
    /// Min-heap over the composite key
    entries: BinaryHeap<Reverse<QueueEntry<T>>>,
    next_sequence: u64,
    unfinished: usize,
    accepted: u64,
    rejected: u64,
    closed: bool,
}

/// Bounded, thread-safe priority mailbox
///
/// Producers call [`put`](Self::put), which never blocks and reports a full
/// queue by returning `false`. Consumers call [`get`](Self::get) to take the
/// entry with the smallest composite key, then [`mark_done`](Self::mark_done)
/// once the message has been processed. [`wait_all`](Self::wait_all) blocks
/// until every accepted message has been marked done.
///
/// # Thread Safety
///
/// The ordered store, the sequence counter and the unfinished counter share
/// one mutex, so the capacity check and the insertion are a single atomic
/// step. Share the queue across threads with `Arc<PriorityBoundedQueue<T>>`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use utilkit::queue::{Message, Priority, PriorityBoundedQueue};
///
/// let queue = PriorityBoundedQueue::new(2).unwrap();
/// assert!(queue.put(Message::new("a", "first").with_priority(Priority::Normal)));
/// assert!(queue.put(Message::new("b", "urgent").with_priority(Priority::High)));
/// assert!(!queue.put(Message::new("c", "late").with_priority(Priority::Low)));
///
/// assert_eq!(queue.get(None).unwrap().id(), "b");
/// assert_eq!(queue.get(None).unwrap().id(), "a");
/// assert!(queue.get(Some(Duration::from_millis(100))).is_none());
/// ```
pub struct PriorityBoundedQueue<T> {
    state: Mutex<QueueState<T>>,
    /// Signalled when an entry is inserted or the queue is closed
    available: Condvar,
    /// Signalled when the unfinished counter reaches zero
    drained: Condvar,
    capacity: usize,
}

impl<T> PriorityBoundedQueue<T> {
    /// Create a queue holding at most `capacity` entries
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity { capacity });
        }
        Ok(Self::with_valid_capacity(capacity))
    }

    fn with_valid_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                entries: BinaryHeap::new(),
                next_sequence: 1,
                unfinished: 0,
                accepted: 0,
                rejected: 0,
                closed: false,
            }),
            available: Condvar::new(),
            drained: Condvar::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held
    pub fn size(&self) -> usize {
        lock_or_recover(&self.state, LOCK_CONTEXT).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_full(&self) -> bool {
        self.size() >= self.capacity
    }

    /// Accepted messages not yet reported complete
    pub fn unfinished(&self) -> usize {
        lock_or_recover(&self.state, LOCK_CONTEXT).unfinished
    }

    pub fn is_closed(&self) -> bool {
        lock_or_recover(&self.state, LOCK_CONTEXT).closed
    }

    pub fn stats(&self) -> QueueStats {
        let state = lock_or_recover(&self.state, LOCK_CONTEXT);
        QueueStats {
            len: state.entries.len(),
            capacity: self.capacity,
            unfinished: state.unfinished,
            accepted: state.accepted,
            rejected: state.rejected,
            next_sequence: state.next_sequence,
            closed: state.closed,
        }
    }

    /// Insert a message without blocking
    ///
    /// Returns `false`, leaving the queue unchanged, when the queue is full
    /// or closed. On success the unfinished counter grows by one.
    pub fn put(&self, message: Message<T>) -> bool {
        let mut state = lock_or_recover(&self.state, LOCK_CONTEXT);

        if state.closed || state.entries.len() >= self.capacity {
            state.rejected += 1;
            log::debug!(
                "Rejected message '{}' (len {}/{}, closed: {})",
                message.id(),
                state.entries.len(),
                self.capacity,
                state.closed
            );
            return false;
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        log::trace!(
            "Accepted message '{}' as sequence {} ({})",
            message.id(),
            sequence,
            message.priority()
        );
        state.entries.push(Reverse(QueueEntry::new(sequence, message)));
        state.unfinished += 1;
        state.accepted += 1;
        drop(state);

        self.available.notify_one();
        true
    }

    /// Remove and return the entry with the smallest composite key
    ///
    /// - `None` waits until an entry is available or the queue is closed
    /// - `Some(Duration::ZERO)` polls without blocking
    /// - `Some(d)` waits at most `d`
    ///
    /// Absence is reported as `None`, never as an error.
    pub fn get(&self, timeout: Option<Duration>) -> Option<Message<T>> {
        // A deadline too far in the future to represent is treated as no deadline
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));

        let mut state = lock_or_recover(&self.state, LOCK_CONTEXT);
        loop {
            if let Some(Reverse(entry)) = state.entries.pop() {
                return Some(entry.message);
            }
            if state.closed {
                return None;
            }

            match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    let (guard, _) = wait_timeout_or_recover(
                        &self.available,
                        state,
                        deadline - now,
                        LOCK_CONTEXT,
                    );
                    state = guard;
                }
                None => state = wait_or_recover(&self.available, state, LOCK_CONTEXT),
            }
        }
    }

    /// Non-blocking poll, equivalent to `get(Some(Duration::ZERO))`
    pub fn try_get(&self) -> Option<Message<T>> {
        self.get(Some(Duration::ZERO))
    }

    /// Report one accepted message as processed
    ///
    /// Calling this more often than messages were accepted is a protocol
    /// error: the counter stays at zero and
    /// [`QueueError::MarkDoneUnderflow`] is returned.
    pub fn mark_done(&self) -> QueueResult<()> {
        let mut state = lock_or_recover(&self.state, LOCK_CONTEXT);

        if state.unfinished == 0 {
            log::error!("mark_done called with no unfinished messages");
            return Err(QueueError::MarkDoneUnderflow);
        }

        state.unfinished -= 1;
        if state.unfinished == 0 {
            self.drained.notify_all();
        }
        Ok(())
    }

    /// Block until every accepted message has been marked done
    pub fn wait_all(&self) {
        let mut state = lock_or_recover(&self.state, LOCK_CONTEXT);
        while state.unfinished > 0 {
            state = wait_or_recover(&self.drained, state, LOCK_CONTEXT);
        }
    }

    /// Like [`wait_all`](Self::wait_all) but gives up after `timeout`
    ///
    /// Returns `true` if the unfinished counter reached zero in time.
    pub fn wait_all_timeout(&self, timeout: Duration) -> bool {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                self.wait_all();
                return true;
            }
        };

        let mut state = lock_or_recover(&self.state, LOCK_CONTEXT);
        while state.unfinished > 0 {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) =
                wait_timeout_or_recover(&self.drained, state, deadline - now, LOCK_CONTEXT);
            state = guard;
        }
        true
    }

    /// Stop accepting messages and wake every blocked consumer
    ///
    /// Entries already queued can still be taken; once the store is empty
    /// `get` returns `None` immediately. `wait_all` is unaffected.
    pub fn close(&self) {
        let mut state = lock_or_recover(&self.state, LOCK_CONTEXT);
        if !state.closed {
            state.closed = true;
            log::debug!(
                "Queue closed with {} queued and {} unfinished",
                state.entries.len(),
                state.unfinished
            );
        }
        drop(state);
        self.available.notify_all();
    }

    /// Create a publisher handle that refers to this queue weakly
    pub fn create_publisher(self: &Arc<Self>, producer_id: impl Into<String>) -> QueuePublisher<T> {
        QueuePublisher::new(producer_id.into(), Arc::downgrade(self))
    }

    /// Create a consumer handle that refers to this queue weakly
    pub fn create_consumer(self: &Arc<Self>, consumer_id: impl Into<String>) -> QueueConsumer<T> {
        QueueConsumer::new(consumer_id.into(), Arc::downgrade(self))
    }
}

impl<T> Default for PriorityBoundedQueue<T> {
    fn default() -> Self {
        Self::with_valid_capacity(DEFAULT_CAPACITY)
    }
}

impl<T> fmt::Debug for PriorityBoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("PriorityBoundedQueue")
            .field("len", &stats.len)
            .field("capacity", &stats.capacity)
            .field("unfinished", &stats.unfinished)
            .field("closed", &stats.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::message::Priority;

    #[test]
    fn test_queue_creation() {
        let queue: PriorityBoundedQueue<String> = PriorityBoundedQueue::new(1000).unwrap();

        assert_eq!(queue.capacity(), 1000);
        assert_eq!(queue.size(), 0);
        assert!(queue.is_empty());
        assert!(!queue.is_full());
        assert_eq!(queue.stats().next_sequence, 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        match PriorityBoundedQueue::<String>::new(0) {
            Err(QueueError::InvalidCapacity { capacity }) => assert_eq!(capacity, 0),
            other => panic!("Expected InvalidCapacity error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_capacity() {
        let queue: PriorityBoundedQueue<u8> = PriorityBoundedQueue::default();
        assert_eq!(queue.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_entry_key_is_strict_total_order() {
        let ts = SystemTime::now();
        let a = QueueEntry::new(1, Message::new("a", ()).with_timestamp(ts));
        let b = QueueEntry::new(2, Message::new("b", ()).with_timestamp(ts));
        let c = QueueEntry::new(
            3,
            Message::new("c", ())
                .with_priority(Priority::High)
                .with_timestamp(ts),
        );

        assert!(a < b, "equal rank and timestamp fall back to sequence");
        assert!(c < a, "higher priority sorts first");
        assert!(a != b, "distinct sequences never compare equal");
    }

    #[test]
    fn test_sequence_increases_only_on_accept() {
        let queue = PriorityBoundedQueue::new(1).unwrap();

        assert!(queue.put(Message::new("m1", 1)));
        assert!(!queue.put(Message::new("m2", 2)));
        assert_eq!(queue.stats().next_sequence, 2);

        queue.get(None).unwrap();
        assert!(queue.put(Message::new("m3", 3)));
        assert_eq!(queue.stats().next_sequence, 3);

        let stats = queue.stats();
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 1);
    }

    #[test]
    fn test_earlier_timestamp_wins_within_priority() {
        let queue = PriorityBoundedQueue::new(10).unwrap();
        let now = SystemTime::now();

        assert!(queue.put(Message::new("later", ()).with_timestamp(now)));
        assert!(queue.put(Message::new("earlier", ()).with_timestamp(now - Duration::from_secs(5))));

        assert_eq!(queue.try_get().unwrap().id(), "earlier");
        assert_eq!(queue.try_get().unwrap().id(), "later");
    }

    #[test]
    fn test_debug_does_not_require_debug_payload() {
        struct Opaque;
        let queue = PriorityBoundedQueue::new(3).unwrap();
        queue.put(Message::new("x", Opaque));

        let rendered = format!("{:?}", queue);
        assert!(rendered.contains("len: 1"));
        assert!(rendered.contains("capacity: 3"));
    }
}
