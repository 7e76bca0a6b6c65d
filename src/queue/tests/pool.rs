//! Tests for the named queue pool

use crate::queue::api::{PoolConfig, QueueError, QueuePoolManager, QueueStatus};
use std::sync::Arc;

#[test]
fn test_capacity_limit_on_set() {
    let pool = QueuePoolManager::new(PoolConfig::with_pool_size(3));

    pool.set::<String>("1").unwrap();
    pool.set::<String>("2").unwrap();
    pool.set::<String>("3").unwrap();
    let err = pool.set::<String>("4").unwrap_err();

    assert_eq!(err, QueueError::MaximumQueuePoolSize { max_pool_size: 3 });
    assert_eq!(err.to_string(), "The queue pool has reached its maximum size (3).");
    assert_eq!(pool.len(), 3);
    assert!(!pool.contains("4"));
}

#[test]
fn test_duplicate_set_is_rejected() {
    let pool = QueuePoolManager::unbounded();

    pool.set::<u32>("q").unwrap();
    let err = pool.set::<u32>("q").unwrap_err();

    assert_eq!(
        err,
        QueueError::ExistQueue {
            name: "q".to_string()
        }
    );
    assert_eq!(err.to_string(), "The queue q already exists.");
}

#[test]
fn test_duplicate_check_precedes_capacity_check() {
    let pool = QueuePoolManager::new(PoolConfig::with_pool_size(1));
    pool.set::<u32>("only").unwrap();

    assert!(matches!(
        pool.set::<u32>("only"),
        Err(QueueError::ExistQueue { .. })
    ));
}

#[test]
fn test_auto_create_respects_capacity() {
    let pool = QueuePoolManager::new(PoolConfig::with_pool_size(1));
    pool.enqueue("first", 1u8).unwrap();

    assert_eq!(
        pool.enqueue("second", 2u8).unwrap_err(),
        QueueError::MaximumQueuePoolSize { max_pool_size: 1 }
    );
    assert!(matches!(
        pool.when_dequeued::<u8>("third"),
        Err(QueueError::MaximumQueuePoolSize { .. })
    ));
    assert!(matches!(
        pool.status_change::<u8>("fourth"),
        Err(QueueError::MaximumQueuePoolSize { .. })
    ));
    // Existing queues stay reachable at capacity
    pool.enqueue("first", 3u8).unwrap();
    assert_eq!(pool.backlog_len("first"), Some(2));
}

#[test]
fn test_zero_capacity_pool_accepts_nothing() {
    let pool = QueuePoolManager::new(PoolConfig::with_pool_size(0));

    assert!(pool.set::<u8>("any").is_err());
    assert!(pool.is_empty());
}

#[test]
fn test_get_or_create_returns_same_queue() {
    let pool = QueuePoolManager::unbounded();

    let first = pool.get_or_create::<String>("jobs").unwrap();
    let second = pool.get_or_create::<String>("jobs").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.queue_id(), "jobs");
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_get_does_not_create() {
    let pool = QueuePoolManager::unbounded();

    assert!(pool.get::<String>("missing").is_none());
    assert!(pool.is_empty());
}

#[test]
fn test_get_with_wrong_type_is_absent() {
    let pool = QueuePoolManager::unbounded();
    pool.set::<String>("typed").unwrap();

    assert!(pool.get::<u64>("typed").is_none());
    assert!(pool.get::<String>("typed").is_some());
    assert_eq!(
        pool.enqueue("typed", 5u64).unwrap_err(),
        QueueError::QueueTypeMismatch {
            name: "typed".to_string()
        }
    );
}

#[test]
fn test_queues_of_different_types_coexist() {
    let pool = QueuePoolManager::unbounded();

    pool.enqueue("numbers", 1i64).unwrap();
    pool.enqueue("words", "one".to_string()).unwrap();

    let numbers = pool.get::<i64>("numbers").unwrap();
    let words = pool.get::<String>("words").unwrap();
    assert_eq!(numbers.head_of_line().unwrap().value, 1);
    assert_eq!(words.head_of_line().unwrap().value, "one");
}

#[test]
fn test_forwarders_address_named_queue() {
    let pool = QueuePoolManager::unbounded();
    let mut ready = pool.when_ready_to_dequeue::<&str>("jobs").unwrap();
    let mut dequeued = pool.when_dequeued::<&str>("jobs").unwrap();
    let mut status = pool.status_change::<&str>("jobs").unwrap();

    pool.enqueue("jobs", "a").unwrap();
    pool.enqueue("jobs", "b").unwrap();
    pool.dequeue("jobs");

    let ready: Vec<_> = ready.drain().into_iter().map(|i| i.value).collect();
    let dequeued: Vec<_> = dequeued.drain().into_iter().map(|i| i.value).collect();
    assert_eq!(ready, vec!["a", "b"]);
    assert_eq!(dequeued, vec!["a"]);
    assert_eq!(status.drain(), vec![QueueStatus::Pending]);
    assert_eq!(pool.status("jobs"), Some(QueueStatus::Pending));
}

#[test]
fn test_dequeue_on_unknown_name_creates_nothing() {
    let pool = QueuePoolManager::unbounded();

    pool.dequeue("ghost");

    assert!(!pool.contains("ghost"));
    assert_eq!(pool.status("ghost"), None);
    assert_eq!(pool.backlog_len("ghost"), None);
}

#[test]
fn test_status_change_on_existing_queue_of_any_type() {
    let pool = QueuePoolManager::unbounded();
    pool.set::<Vec<u8>>("bytes").unwrap();

    let mut status = pool.status_change::<()>("bytes").unwrap();
    pool.enqueue("bytes", vec![1u8]).unwrap();

    assert_eq!(status.drain(), vec![QueueStatus::Pending]);
    assert!(pool.get::<Vec<u8>>("bytes").is_some());
}

#[test]
fn test_remove_destroys_and_unregisters() {
    let pool = QueuePoolManager::unbounded();
    let queue = pool.set::<u32>("temp").unwrap();
    let mut status = queue.status_change();

    pool.remove("temp");
    pool.remove("temp");

    assert!(!pool.contains("temp"));
    assert!(queue.is_destroyed());
    assert_eq!(status.drain(), vec![QueueStatus::Destroyed]);
}

#[test]
fn test_remove_frees_capacity() {
    let pool = QueuePoolManager::new(PoolConfig::with_pool_size(1));
    pool.set::<u32>("a").unwrap();
    pool.remove("a");

    assert!(pool.set::<u32>("b").is_ok());
}

#[test]
fn test_name_reused_after_remove_is_fresh_queue() {
    let pool = QueuePoolManager::unbounded();
    pool.enqueue("reuse", 1).unwrap();
    pool.enqueue("reuse", 2).unwrap();
    pool.remove("reuse");

    let queue = pool.get_or_create::<i32>("reuse").unwrap();
    assert_eq!(queue.latest_index(), None);
    assert_eq!(queue.enqueue(3), Some(0));
}

#[test]
fn test_clear_destroys_every_queue() {
    let pool = QueuePoolManager::unbounded();
    let a = pool.set::<u8>("a").unwrap();
    let b = pool.set::<String>("b").unwrap();

    pool.clear();

    assert!(pool.is_empty());
    assert!(a.is_destroyed());
    assert!(b.is_destroyed());
    assert!(pool.names().is_empty());
}

#[test]
fn test_names_are_sorted() {
    let pool = QueuePoolManager::unbounded();
    for name in ["zeta", "alpha", "mid"] {
        pool.set::<()>(name).unwrap();
    }

    assert_eq!(pool.names(), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_default_pool_is_unbounded() {
    let pool = QueuePoolManager::default();

    assert_eq!(pool.max_pool_size(), None);
    for i in 0..100 {
        pool.set::<u8>(&format!("q{}", i)).unwrap();
    }
    assert_eq!(pool.len(), 100);
}

#[tokio::test]
async fn test_pool_waiter_resolves() {
    let pool = QueuePoolManager::unbounded();
    let waiter = pool.enqueue_and_wait_dequeue("jobs", 9u16).unwrap();

    pool.dequeue("jobs");

    let value = tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
        .await
        .expect("waiter should resolve");
    assert_eq!(value.map(|item| item.value), Some(9));
}

#[tokio::test]
async fn test_pool_remove_abandons_waiter() {
    let pool = QueuePoolManager::unbounded();
    let waiter = pool.enqueue_and_wait_dequeue("jobs", 1u16).unwrap();

    pool.remove("jobs");

    assert_eq!(waiter.await, None);
}

#[test]
fn test_pool_config_from_toml() {
    assert_eq!(
        PoolConfig::from_toml_str("pool-size = 4").unwrap(),
        PoolConfig::with_pool_size(4)
    );
    assert_eq!(PoolConfig::from_toml_str("").unwrap(), PoolConfig::unbounded());
    assert!(PoolConfig::from_toml_str("pool-size = \"many\"").is_err());
    assert!(PoolConfig::from_toml_str("pool-size = -1").is_err());
}
