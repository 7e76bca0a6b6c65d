//! One-shot completion handle for a single enqueued item

use crate::queue::item::QueueItem;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Resolves once the item enqueued at [`DequeueWaiter::index`] is released
///
/// Output is the released item, the same `Arc` that `when_dequeued`
/// subscribers receive, so any item type can be awaited. If the queue is
/// destroyed first, the registration is dropped with the rest of the queue
/// state and the waiter resolves to `None`.
#[derive(Debug)]
#[must_use = "a DequeueWaiter does nothing unless awaited"]
pub struct DequeueWaiter<T> {
    index: Option<u64>,
    receiver: oneshot::Receiver<Arc<QueueItem<T>>>,
}

impl<T> DequeueWaiter<T> {
    pub(crate) fn new(index: u64, receiver: oneshot::Receiver<Arc<QueueItem<T>>>) -> Self {
        Self {
            index: Some(index),
            receiver,
        }
    }

    /// A waiter for a queue that no longer accepts items
    pub(crate) fn abandoned() -> Self {
        let (_, receiver) = oneshot::channel();
        Self {
            index: None,
            receiver,
        }
    }

    /// Index assigned to the awaited item, `None` when the queue was already destroyed
    pub fn index(&self) -> Option<u64> {
        self.index
    }
}

impl<T> Future for DequeueWaiter<T> {
    type Output = Option<Arc<QueueItem<T>>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().receiver)
            .poll(cx)
            .map(Result::ok)
    }
}
