//! End-to-end queue pool scenarios through the public API

use futures::FutureExt;
use handoff_queue::queue::api::{PoolConfig, QueueError, QueuePoolManager, QueueStatus};
use std::time::Duration;
use tokio::time::timeout;

#[test]
fn pool_refuses_queue_beyond_capacity() {
    let pool = QueuePoolManager::new(PoolConfig::with_pool_size(3));

    for name in ["1", "2", "3"] {
        pool.set::<char>(name).expect("within capacity");
    }

    assert_eq!(
        pool.set::<char>("4").unwrap_err(),
        QueueError::MaximumQueuePoolSize { max_pool_size: 3 }
    );
}

#[test]
fn pool_refuses_duplicate_name() {
    let pool = QueuePoolManager::unbounded();

    pool.set::<char>("q").unwrap();

    assert_eq!(
        pool.set::<char>("q").unwrap_err(),
        QueueError::ExistQueue {
            name: "q".to_string()
        }
    );
}

#[test]
fn queue_releases_three_items_in_order() {
    let pool = QueuePoolManager::unbounded();
    let queue = pool.set::<char>("letters").unwrap();
    let mut dequeued = queue.when_dequeued();
    let mut status = queue.status_change();

    for letter in ['a', 'b', 'c'] {
        queue.enqueue(letter);
    }
    for _ in 0..3 {
        queue.dequeue();
    }

    let released: Vec<char> = dequeued.drain().iter().map(|item| item.value).collect();
    assert_eq!(released, vec!['a', 'b', 'c']);
    assert_eq!(status.drain(), vec![QueueStatus::Pending, QueueStatus::Empty]);
}

#[tokio::test]
async fn waiter_resolves_after_exactly_three_releases() {
    let pool = QueuePoolManager::unbounded();
    pool.enqueue("numbers", '1').unwrap();
    pool.enqueue("numbers", '2').unwrap();
    let mut waiter = pool.enqueue_and_wait_dequeue("numbers", '3').unwrap();

    for _ in 0..2 {
        pool.dequeue("numbers");
        assert_eq!((&mut waiter).now_or_never(), None);
    }
    pool.dequeue("numbers");

    let value = timeout(Duration::from_secs(1), waiter)
        .await
        .expect("waiter should resolve")
        .expect("item should be released");
    assert_eq!(value.index, 2);
    assert_eq!(value.value, '3');
}

#[test]
fn destroy_abandons_backlog_and_silences_queue() {
    let pool = QueuePoolManager::unbounded();
    let queue = pool.set::<char>("doomed").unwrap();
    queue.enqueue('x');
    queue.enqueue('y');
    let mut ready = queue.when_ready_to_dequeue();
    let mut dequeued = queue.when_dequeued();
    let mut status = queue.status_change();

    queue.destroy();
    queue.enqueue('z');
    queue.dequeue();

    assert!(dequeued.drain().is_empty());
    assert!(ready.drain().is_empty());
    assert_eq!(status.drain(), vec![QueueStatus::Destroyed]);
    assert!(status.is_terminated());
}

#[tokio::test]
async fn producer_and_consumer_tasks_share_the_pool() {
    use std::sync::Arc;

    let pool = Arc::new(QueuePoolManager::new(PoolConfig::with_pool_size(2)));
    let mut ready = pool.when_ready_to_dequeue::<u32>("work").unwrap();

    let consumer = {
        let pool = Arc::clone(&pool);
        tokio::spawn(async move {
            let mut total = 0;
            while let Some(item) = ready.recv().await {
                total += item.value;
                pool.dequeue("work");
                if item.value == 10 {
                    break;
                }
            }
            total
        })
    };

    for value in 1..=10u32 {
        pool.enqueue("work", value).unwrap();
        tokio::task::yield_now().await;
    }

    let total = timeout(Duration::from_secs(2), consumer)
        .await
        .expect("consumer should finish")
        .expect("consumer should not panic");
    assert_eq!(total, 55);
    assert_eq!(pool.status("work"), Some(QueueStatus::Empty));
}
