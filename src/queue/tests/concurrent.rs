//! Tests for concurrent queue operations

#[cfg(test)]
mod tests {
    use crate::queue::api::{Message, Priority, PriorityBoundedQueue};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_wait_all_blocks_until_last_mark_done() {
        let queue = Arc::new(PriorityBoundedQueue::new(10).unwrap());
        for i in 0..5 {
            assert!(queue.put(Message::new(format!("m{}", i), i)));
        }

        for _ in 0..4 {
            queue.try_get().unwrap();
            queue.mark_done().unwrap();
        }

        let released = Arc::new(AtomicBool::new(false));
        let waiter = {
            let queue = Arc::clone(&queue);
            let released = Arc::clone(&released);
            thread::spawn(move || {
                queue.wait_all();
                released.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(150));
        assert!(
            !released.load(Ordering::SeqCst),
            "wait_all must block while one message is unfinished"
        );

        queue.try_get().unwrap();
        queue.mark_done().unwrap();

        waiter.join().unwrap();
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_racing_producers_never_exceed_capacity() {
        let capacity = 64;
        let producers = 8;
        let per_producer = 32;
        let queue = Arc::new(PriorityBoundedQueue::new(capacity).unwrap());
        let barrier = Arc::new(Barrier::new(producers));
        let accepted = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = Arc::clone(&queue);
                let barrier = Arc::clone(&barrier);
                let accepted = Arc::clone(&accepted);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..per_producer {
                        if queue.put(Message::new(format!("p{}-{}", p, i), ())) {
                            accepted.fetch_add(1, Ordering::SeqCst);
                        }
                        assert!(queue.size() <= capacity);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(accepted.load(Ordering::SeqCst), capacity);
        assert_eq!(queue.size(), capacity);

        let stats = queue.stats();
        assert_eq!(stats.accepted as usize, capacity);
        assert_eq!(stats.rejected as usize, producers * per_producer - capacity);
        assert_eq!(stats.next_sequence as usize, capacity + 1);
    }

    #[test]
    fn test_each_message_delivered_to_exactly_one_consumer() {
        let total = 400;
        let consumers = 4;
        let queue = Arc::new(PriorityBoundedQueue::new(total).unwrap());

        let handles: Vec<_> = (0..consumers)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(message) = queue.get(None) {
                        seen.push(message.into_content());
                        queue.mark_done().unwrap();
                    }
                    seen
                })
            })
            .collect();

        for i in 0..total {
            let priority = match i % 3 {
                0 => Priority::High,
                1 => Priority::Normal,
                _ => Priority::Low,
            };
            assert!(queue.put(Message::new(format!("m{}", i), i).with_priority(priority)));
        }

        queue.wait_all();
        queue.close();

        let mut delivered = HashSet::new();
        let mut count = 0;
        for handle in handles {
            for value in handle.join().unwrap() {
                count += 1;
                assert!(delivered.insert(value), "message {} delivered twice", value);
            }
        }

        assert_eq!(count, total);
        assert_eq!(queue.unfinished(), 0);
    }

    #[test]
    fn test_blocked_get_wakes_on_put() {
        let queue = Arc::new(PriorityBoundedQueue::new(4).unwrap());

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.get(None).map(|m| m.id().to_string()))
        };

        thread::sleep(Duration::from_millis(50));
        assert!(queue.put(Message::new("wake-up", ())));

        assert_eq!(consumer.join().unwrap().as_deref(), Some("wake-up"));
    }

    #[test]
    fn test_timed_get_receives_late_put() {
        let queue = Arc::new(PriorityBoundedQueue::new(4).unwrap());

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let start = Instant::now();
                let message = queue.get(Some(Duration::from_secs(5)));
                (message.map(|m| m.into_content()), start.elapsed())
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(queue.put(Message::new("late", 7)));

        let (content, elapsed) = consumer.join().unwrap();
        assert_eq!(content, Some(7));
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_close_wakes_all_blocked_consumers() {
        let queue: Arc<PriorityBoundedQueue<()>> = Arc::new(PriorityBoundedQueue::new(4).unwrap());

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.get(None).is_none())
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        queue.close();

        for handle in handles {
            assert!(handle.join().unwrap(), "closed queue should yield None");
        }
    }

    #[test]
    fn test_multiple_wait_all_callers_released_together() {
        let queue = Arc::new(PriorityBoundedQueue::new(4).unwrap());
        assert!(queue.put(Message::new("only", ())));

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.wait_all())
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        queue.try_get().unwrap();
        queue.mark_done().unwrap();

        for waiter in waiters {
            waiter.join().unwrap();
        }
    }
}
