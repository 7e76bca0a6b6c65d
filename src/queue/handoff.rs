//! HandoffQueue - strict FIFO handoff with an external release trigger
//!
//! Items are buffered without bound but exposed one at a time: the oldest
//! unreleased item occupies the head-of-line slot until a consumer calls
//! [`HandoffQueue::dequeue`], and only then does the next item move up.
//!
//! ```text
//!  enqueue ──► backlog [3][4][5] ──► head-of-line [2] ──dequeue──► released
//!                                         │                          │
//!                              when_ready_to_dequeue           when_dequeued
//! ```

use crate::notifications::api::{Broadcaster, DistinctBroadcaster, Subscription};
use crate::queue::item::QueueItem;
use crate::queue::status::QueueStatus;
use crate::queue::waiter::DequeueWaiter;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

type SharedItem<T> = Arc<QueueItem<T>>;

/// Everything a queue mutates, kept behind a single lock
struct HandoffState<T> {
    backlog: VecDeque<SharedItem<T>>,
    head_of_line: Option<SharedItem<T>>,
    latest_index: Option<u64>,
    status: QueueStatus,
    waiters: HashMap<u64, oneshot::Sender<SharedItem<T>>>,
    ready: Broadcaster<SharedItem<T>>,
    dequeued: Broadcaster<SharedItem<T>>,
    status_changes: DistinctBroadcaster<QueueStatus>,
}

impl<T> HandoffState<T> {
    fn new() -> Self {
        Self {
            backlog: VecDeque::new(),
            head_of_line: None,
            latest_index: None,
            status: QueueStatus::Empty,
            waiters: HashMap::new(),
            ready: Broadcaster::new(),
            dequeued: Broadcaster::new(),
            status_changes: DistinctBroadcaster::new(),
        }
    }

    fn publish_status(&mut self, status: QueueStatus) {
        self.status = status;
        self.status_changes.publish(status);
    }

    fn push(&mut self, queue_id: &str, value: T) -> Option<u64> {
        if self.status.is_terminal() {
            log::trace!("Queue '{}' is destroyed, dropping enqueued item", queue_id);
            return None;
        }

        let index = self.latest_index.map_or(0, |latest| latest + 1);
        self.latest_index = Some(index);
        let item = Arc::new(QueueItem::new(index, value));
        log::trace!("Queue '{}' enqueued item #{}", queue_id, index);

        self.publish_status(QueueStatus::Pending);
        if self.head_of_line.is_none() {
            self.promote(queue_id, item);
        } else {
            self.backlog.push_back(item);
        }
        Some(index)
    }

    fn promote(&mut self, queue_id: &str, item: SharedItem<T>) {
        log::trace!("Queue '{}' item #{} is head-of-line", queue_id, item.index);
        self.head_of_line = Some(Arc::clone(&item));
        self.ready.publish(item);
    }

    fn release(&mut self, queue_id: &str) -> Option<SharedItem<T>> {
        if self.status.is_terminal() {
            return None;
        }
        // Edge-triggered: with nothing at the head the signal is simply lost
        let item = match self.head_of_line.take() {
            Some(item) => item,
            None => {
                log::trace!("Queue '{}' ignored dequeue with no head-of-line item", queue_id);
                return None;
            }
        };

        let status = if Some(item.index) == self.latest_index {
            QueueStatus::Empty
        } else {
            QueueStatus::Pending
        };
        self.publish_status(status);
        self.dequeued.publish(Arc::clone(&item));
        if let Some(waiter) = self.waiters.remove(&item.index) {
            let _ = waiter.send(Arc::clone(&item));
        }
        log::trace!("Queue '{}' released item #{}", queue_id, item.index);

        if let Some(next) = self.backlog.pop_front() {
            self.promote(queue_id, next);
        }
        Some(item)
    }

    fn teardown(&mut self, queue_id: &str) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        let subscribers = self.ready.subscriber_count()
            + self.dequeued.subscriber_count()
            + self.status_changes.subscriber_count();
        self.publish_status(QueueStatus::Destroyed);

        let abandoned = self.backlog.len() + usize::from(self.head_of_line.is_some());
        self.backlog.clear();
        self.head_of_line = None;
        self.waiters.clear();

        self.ready.close();
        self.dequeued.close();
        self.status_changes.close();

        log::debug!(
            "Queue '{}' destroyed, {} unreleased item(s) abandoned, {} subscription(s) closed",
            queue_id,
            abandoned,
            subscribers
        );
        true
    }
}

/// Single-consumer-release queue
///
/// All transitions run under one mutex and publish their notifications before
/// the lock is released, so every subscriber observes the events of one queue
/// in exactly the order the state machine produced them. Nothing ever blocks
/// waiting for a release: the wait is just the occupied head-of-line slot.
///
/// Share a queue across tasks as `Arc<HandoffQueue<T>>`. Dropping the last
/// handle destroys the queue.
///
/// # Example
///
/// ```rust
/// use handoff_queue::queue::api::{HandoffQueue, QueueStatus};
///
/// let queue = HandoffQueue::new("jobs");
/// let mut released = queue.when_dequeued();
///
/// queue.enqueue("first");
/// queue.enqueue("second");
/// assert_eq!(queue.status(), QueueStatus::Pending);
///
/// queue.dequeue();
/// assert_eq!(released.try_recv().unwrap().value, "first");
/// ```
pub struct HandoffQueue<T> {
    queue_id: String,
    state: Mutex<HandoffState<T>>,
}

impl<T> HandoffQueue<T> {
    pub fn new(queue_id: impl Into<String>) -> Self {
        Self {
            queue_id: queue_id.into(),
            state: Mutex::new(HandoffState::new()),
        }
    }

    pub fn queue_id(&self) -> &str {
        &self.queue_id
    }

    // Every transition leaves the state consistent, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, HandoffState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item to the queue
    ///
    /// Returns the index assigned to the item, or `None` if the queue has
    /// been destroyed (the value is dropped silently).
    pub fn enqueue(&self, value: T) -> Option<u64> {
        self.lock().push(&self.queue_id, value)
    }

    /// Release the current head-of-line item, if any
    ///
    /// Calling this with no head-of-line item does nothing and is not
    /// remembered: it never pre-authorises the release of a later item.
    pub fn dequeue(&self) -> Option<Arc<QueueItem<T>>> {
        self.lock().release(&self.queue_id)
    }

    /// Enqueue an item and get a handle that resolves when that item is released
    pub fn enqueue_and_wait_dequeue(&self, value: T) -> DequeueWaiter<T> {
        let mut state = self.lock();
        match state.push(&self.queue_id, value) {
            Some(index) => {
                let (sender, receiver) = oneshot::channel();
                state.waiters.insert(index, sender);
                DequeueWaiter::new(index, receiver)
            }
            None => DequeueWaiter::abandoned(),
        }
    }

    /// Items as they become head-of-line, in enqueue order
    pub fn when_ready_to_dequeue(&self) -> Subscription<Arc<QueueItem<T>>> {
        self.lock().ready.subscribe()
    }

    /// Items as they are released, in enqueue order
    pub fn when_dequeued(&self) -> Subscription<Arc<QueueItem<T>>> {
        self.lock().dequeued.subscribe()
    }

    /// Status transitions
    ///
    /// Each subscription filters its own consecutive duplicates, so it never
    /// sees the same status twice in a row but always gets the first status
    /// published after it subscribed.
    pub fn status_change(&self) -> Subscription<QueueStatus> {
        self.lock().status_changes.subscribe()
    }

    /// Destroy the queue
    ///
    /// The first call publishes [`QueueStatus::Destroyed`] and closes every
    /// notification channel. Unreleased items and pending waiters are
    /// abandoned. Later calls, and any further enqueue/dequeue, do nothing.
    pub fn destroy(&self) {
        self.lock().teardown(&self.queue_id);
    }

    pub fn is_destroyed(&self) -> bool {
        self.lock().status.is_terminal()
    }

    pub fn status(&self) -> QueueStatus {
        self.lock().status
    }

    /// Highest index issued so far, `None` before the first enqueue
    pub fn latest_index(&self) -> Option<u64> {
        self.lock().latest_index
    }

    /// Number of unreleased items, including the head-of-line item
    pub fn backlog_len(&self) -> usize {
        let state = self.lock();
        state.backlog.len() + usize::from(state.head_of_line.is_some())
    }

    pub fn head_of_line(&self) -> Option<Arc<QueueItem<T>>> {
        self.lock().head_of_line.clone()
    }
}

impl<T> Drop for HandoffQueue<T> {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        state.teardown(&self.queue_id);
    }
}

impl<T> std::fmt::Debug for HandoffQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("HandoffQueue")
            .field("queue_id", &self.queue_id)
            .field("status", &state.status)
            .field("latest_index", &state.latest_index)
            .field(
                "backlog_len",
                &(state.backlog.len() + usize::from(state.head_of_line.is_some())),
            )
            .finish()
    }
}
