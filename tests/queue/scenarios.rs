//! End-to-end ordering and completion scenarios

use crate::common::{drain_ids, message};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime};
use utilkit::queue::{Message, Priority, PriorityBoundedQueue, QueueError};

#[test]
fn test_mixed_priorities_served_in_rank_then_arrival_order() {
    let queue = Arc::new(PriorityBoundedQueue::new(10).unwrap());

    assert!(queue.put(message("n1", Priority::Normal)));
    assert!(queue.put(message("l1", Priority::Low)));
    assert!(queue.put(message("h1", Priority::High)));
    assert!(queue.put(message("n2", Priority::Normal)));
    assert!(queue.put(message("h2", Priority::High)));

    assert_eq!(drain_ids(&queue), vec!["h1", "h2", "n1", "n2", "l1"]);
    assert_eq!(queue.unfinished(), 0);
}

#[test]
fn test_explicit_timestamps_order_within_priority() {
    let queue = Arc::new(PriorityBoundedQueue::new(4).unwrap());
    let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    queue.put(Message::new("later", String::new()).with_timestamp(base + Duration::from_secs(5)));
    queue.put(Message::new("earlier", String::new()).with_timestamp(base));
    // equal timestamps fall back to arrival order
    queue.put(Message::new("tie-a", String::new()).with_timestamp(base + Duration::from_secs(2)));
    queue.put(Message::new("tie-b", String::new()).with_timestamp(base + Duration::from_secs(2)));

    assert_eq!(drain_ids(&queue), vec!["earlier", "tie-a", "tie-b", "later"]);
}

#[test]
fn test_full_queue_pushes_back_until_space_frees() {
    let queue = Arc::new(PriorityBoundedQueue::new(2).unwrap());

    assert!(queue.put(message("a", Priority::Low)));
    assert!(queue.put(message("b", Priority::Low)));
    assert!(!queue.put(message("c", Priority::High)));
    assert_eq!(queue.size(), 2);

    assert_eq!(queue.try_get().unwrap().id(), "a");
    assert!(queue.put(message("c", Priority::High)));
    assert_eq!(queue.try_get().unwrap().id(), "c");

    let stats = queue.stats();
    assert_eq!(stats.accepted, 3);
    assert_eq!(stats.rejected, 1);
}

#[test]
fn test_wait_all_blocks_until_every_message_completed() {
    let queue = Arc::new(PriorityBoundedQueue::new(8).unwrap());
    for i in 0..5 {
        queue.put(message(&format!("m{}", i), Priority::Normal));
    }

    let worker = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            while let Some(_message) = queue.get(Some(Duration::from_millis(200))) {
                thread::sleep(Duration::from_millis(10));
                queue.mark_done().unwrap();
            }
        })
    };

    let start = Instant::now();
    queue.wait_all();
    assert!(start.elapsed() >= Duration::from_millis(40));
    assert_eq!(queue.unfinished(), 0);
    assert!(queue.is_empty());

    worker.join().unwrap();
}

#[test]
fn test_get_times_out_on_empty_queue() {
    let queue: PriorityBoundedQueue<String> = PriorityBoundedQueue::new(1).unwrap();

    let start = Instant::now();
    assert!(queue.get(Some(Duration::from_millis(50))).is_none());
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert!(queue.try_get().is_none());
}

#[test]
fn test_over_completion_is_reported() {
    let queue = Arc::new(PriorityBoundedQueue::new(2).unwrap());
    queue.put(message("only", Priority::High));
    assert_eq!(drain_ids(&queue), vec!["only"]);

    assert_eq!(queue.mark_done(), Err(QueueError::MarkDoneUnderflow));
    assert_eq!(queue.unfinished(), 0);
}

#[test]
fn test_close_releases_blocked_consumers() {
    let queue: Arc<PriorityBoundedQueue<String>> = Arc::new(PriorityBoundedQueue::new(2).unwrap());

    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.get(None).is_none())
        })
        .collect();

    thread::sleep(Duration::from_millis(50));
    queue.close();

    for waiter in waiters {
        assert!(waiter.join().unwrap());
    }
    assert!(!queue.put(message("late", Priority::High)));
}
