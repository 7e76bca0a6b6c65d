//! Tests for queue destruction and drop

use crate::queue::api::{HandoffQueue, NotificationError, QueueStatus};

#[test]
fn test_destroy_abandons_undelivered_items() {
    let queue = HandoffQueue::new("abandon");
    queue.enqueue("a");
    queue.enqueue("b");

    let mut dequeued = queue.when_dequeued();
    let mut ready = queue.when_ready_to_dequeue();
    let mut status = queue.status_change();

    queue.destroy();

    assert_eq!(status.drain(), vec![QueueStatus::Destroyed]);
    assert!(dequeued.drain().is_empty());
    assert!(ready.drain().is_empty());
    assert!(status.is_terminated());
    assert!(dequeued.is_terminated());
    assert!(ready.is_terminated());
}

#[test]
fn test_operations_after_destroy_emit_nothing() {
    let queue = HandoffQueue::new("dead");
    queue.enqueue(1);
    let mut dequeued = queue.when_dequeued();
    let mut status = queue.status_change();
    queue.destroy();

    assert_eq!(queue.enqueue(2), None);
    assert!(queue.dequeue().is_none());

    assert_eq!(status.drain(), vec![QueueStatus::Destroyed]);
    assert_eq!(dequeued.try_recv().unwrap_err(), NotificationError::Closed);
    assert_eq!(queue.status(), QueueStatus::Destroyed);
    assert_eq!(queue.backlog_len(), 0);
    assert!(queue.head_of_line().is_none());
}

#[test]
fn test_destroy_is_idempotent() {
    let queue: HandoffQueue<u8> = HandoffQueue::new("twice");
    let mut status = queue.status_change();

    queue.destroy();
    queue.destroy();

    assert!(queue.is_destroyed());
    assert_eq!(status.drain(), vec![QueueStatus::Destroyed]);
}

#[test]
fn test_destroyed_is_last_status() {
    let queue = HandoffQueue::new("last");
    let mut status = queue.status_change();

    queue.enqueue(1);
    queue.dequeue();
    queue.destroy();
    queue.enqueue(2);

    let observed = status.drain();
    assert_eq!(
        observed,
        vec![QueueStatus::Pending, QueueStatus::Empty, QueueStatus::Destroyed]
    );
    assert_eq!(
        observed.iter().filter(|s| s.is_terminal()).count(),
        1
    );
}

#[test]
fn test_subscribing_after_destroy_yields_closed_stream() {
    let queue: HandoffQueue<&str> = HandoffQueue::new("late");
    queue.destroy();

    let mut status = queue.status_change();
    let mut ready = queue.when_ready_to_dequeue();

    assert_eq!(status.try_recv().unwrap_err(), NotificationError::Closed);
    assert!(ready.is_terminated());
}

#[test]
fn test_drop_destroys_queue() {
    let queue = HandoffQueue::new("dropped");
    queue.enqueue("pending");
    let mut status = queue.status_change();
    let mut dequeued = queue.when_dequeued();

    drop(queue);

    assert_eq!(status.drain(), vec![QueueStatus::Destroyed]);
    assert!(status.is_terminated());
    assert!(dequeued.drain().is_empty());
    assert!(dequeued.is_terminated());
}

#[tokio::test]
async fn test_stream_ends_after_destroy() {
    use futures::StreamExt;

    let queue = HandoffQueue::new("stream");
    let status = queue.status_change();

    queue.enqueue(7);
    queue.dequeue();
    queue.destroy();

    let collected: Vec<QueueStatus> = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        status.collect(),
    )
    .await
    .expect("stream should end once the queue is destroyed");

    assert_eq!(
        collected,
        vec![QueueStatus::Pending, QueueStatus::Empty, QueueStatus::Destroyed]
    );
}
