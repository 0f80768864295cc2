//! Publisher, consumer and delivery handles across threads

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use utilkit::queue::{Priority, PriorityBoundedQueue, QueueError};

#[test]
fn test_producers_and_consumers_exchange_every_message_once() {
    let queue = Arc::new(PriorityBoundedQueue::<usize>::new(5).unwrap());
    const PER_PRODUCER: usize = 50;

    let consumers: Vec<_> = (0..3)
        .map(|n| {
            let consumer = queue.create_consumer(format!("consumer-{}", n));
            thread::spawn(move || {
                let mut seen = Vec::new();
                while let Some(delivery) = consumer.receive(None).unwrap() {
                    seen.push(*delivery.message().content());
                    delivery.complete().unwrap();
                }
                seen
            })
        })
        .collect();

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let publisher = queue.create_publisher(format!("producer-{}", p));
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    let value = p * PER_PRODUCER + i;
                    while !publisher
                        .publish_with(value.to_string(), value, Priority::Normal)
                        .unwrap()
                    {
                        thread::sleep(Duration::from_millis(1));
                    }
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }
    queue.wait_all();
    queue.close();

    let mut all = HashSet::new();
    let mut total = 0;
    for consumer in consumers {
        let seen = consumer.join().unwrap();
        total += seen.len();
        all.extend(seen);
    }

    assert_eq!(total, 4 * PER_PRODUCER);
    assert_eq!(all.len(), 4 * PER_PRODUCER);
    assert_eq!(queue.unfinished(), 0);
}

#[test]
fn test_uncompleted_delivery_keeps_queue_unfinished() {
    let queue = Arc::new(PriorityBoundedQueue::new(2).unwrap());
    let publisher = queue.create_publisher("producer");
    let consumer = queue.create_consumer("consumer");

    assert!(publisher.publish_with("a", "payload", Priority::High).unwrap());
    let delivery = consumer.receive(Some(Duration::ZERO)).unwrap().unwrap();
    drop(delivery);

    assert!(queue.is_empty());
    assert_eq!(queue.unfinished(), 1);
    assert!(!queue.wait_all_timeout(Duration::from_millis(20)));

    queue.mark_done().unwrap();
    assert!(queue.wait_all_timeout(Duration::from_millis(20)));
}

#[test]
fn test_handles_outliving_the_queue() {
    let queue = Arc::new(PriorityBoundedQueue::<String>::new(1).unwrap());
    let publisher = queue.create_publisher("producer");
    let consumer = queue.create_consumer("consumer");
    drop(queue);

    assert_eq!(
        publisher
            .publish_with("x", "y".to_string(), Priority::Low)
            .unwrap_err(),
        QueueError::QueueDropped
    );
    assert!(matches!(
        consumer.receive(Some(Duration::ZERO)),
        Err(QueueError::QueueDropped)
    ));
}
