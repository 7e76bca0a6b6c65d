//! Traits for the queue system

use crate::notifications::api::Subscription;
use crate::queue::handoff::HandoffQueue;
use crate::queue::status::QueueStatus;
use std::any::Any;
use std::sync::Arc;

/// Item-type-erased view of a [`HandoffQueue`] held by the pool
///
/// The pool stores queues of different item types side by side; typed access
/// goes back through [`PooledQueue::into_any`] and a downcast.
pub(crate) trait PooledQueue: Send + Sync {
    fn destroy(&self);

    /// Release the head-of-line item, if any
    fn release(&self) -> bool;

    fn status(&self) -> QueueStatus;

    fn status_change(&self) -> Subscription<QueueStatus>;

    fn backlog_len(&self) -> usize;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Send + Sync + 'static> PooledQueue for HandoffQueue<T> {
    fn destroy(&self) {
        HandoffQueue::destroy(self)
    }

    fn release(&self) -> bool {
        self.dequeue().is_some()
    }

    fn status(&self) -> QueueStatus {
        HandoffQueue::status(self)
    }

    fn status_change(&self) -> Subscription<QueueStatus> {
        HandoffQueue::status_change(self)
    }

    fn backlog_len(&self) -> usize {
        HandoffQueue::backlog_len(self)
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Recover the typed queue from an erased pool entry
pub(crate) fn downcast_queue<T: Send + Sync + 'static>(
    entry: Arc<dyn PooledQueue>,
) -> Option<Arc<HandoffQueue<T>>> {
    entry.into_any().downcast::<HandoffQueue<T>>().ok()
}
