//! Type definitions for the queue system

/// Point-in-time snapshot of a queue's bookkeeping
///
/// All fields are read under the queue lock, so a snapshot is internally
/// consistent (e.g. `len <= capacity` always holds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStats {
    /// Entries currently held in the ordered store
    pub len: usize,
    /// Fixed maximum number of entries
    pub capacity: usize,
    /// Accepted messages not yet reported complete
    pub unfinished: usize,
    /// Successful `put` calls over the queue's lifetime
    pub accepted: u64,
    /// `put` calls refused because the queue was full or closed
    pub rejected: u64,
    /// Sequence number the next accepted message will receive
    pub next_sequence: u64,
    /// Whether `close` has been called
    pub closed: bool,
}
