//! Queue item tagged with its sequence index

/// A value held by a handoff queue together with the index it was enqueued at
///
/// Indices start at 0 and increase by one per enqueue on the owning queue.
/// Items are shared with subscribers as `Arc<QueueItem<T>>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem<T> {
    pub index: u64,
    pub value: T,
}

impl<T> QueueItem<T> {
    pub fn new(index: u64, value: T) -> Self {
        Self { index, value }
    }
}
