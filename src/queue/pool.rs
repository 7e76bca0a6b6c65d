//! QueuePoolManager - named, bounded registry of handoff queues
//!
//! Callers address queues by name. Most forwarding operations create the
//! named queue on first use; `dequeue` is the exception and never creates
//! anything, since releasing an item from a queue that does not exist has no
//! meaning.

use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use crate::notifications::api::Subscription;
use crate::queue::config::PoolConfig;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::handoff::HandoffQueue;
use crate::queue::item::QueueItem;
use crate::queue::status::QueueStatus;
use crate::queue::traits::{downcast_queue, PooledQueue};
use crate::queue::waiter::DequeueWaiter;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type QueuePool = HashMap<String, Arc<dyn PooledQueue>>;

/// Name-keyed pool of [`HandoffQueue`]s with an optional capacity limit
///
/// Queues of different item types can live in the same pool; typed access
/// with the wrong item type is reported rather than silently reinterpreted.
///
/// # Thread Safety
///
/// The pool is `Send + Sync` and meant to be shared as `Arc<QueuePoolManager>`.
/// Existence check, capacity check and insertion happen under one write
/// guard, so concurrent `set` calls can never push the pool past its limit.
///
/// # Example
///
/// ```rust
/// use handoff_queue::queue::api::{PoolConfig, QueueError, QueuePoolManager};
///
/// let pool = QueuePoolManager::new(PoolConfig::with_pool_size(1));
/// pool.enqueue("uploads", 42u32).unwrap();
///
/// let err = pool.set::<u32>("downloads").unwrap_err();
/// assert_eq!(err, QueueError::MaximumQueuePoolSize { max_pool_size: 1 });
/// ```
pub struct QueuePoolManager {
    queue_pool: RwLock<QueuePool>,
    max_pool_size: Option<usize>,
}

impl Default for QueuePoolManager {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl QueuePoolManager {
    pub fn new(config: PoolConfig) -> Self {
        log::debug!(
            "Creating queue pool (capacity: {})",
            config
                .pool_size
                .map_or_else(|| "unbounded".to_string(), |size| size.to_string())
        );
        Self {
            queue_pool: RwLock::new(HashMap::new()),
            max_pool_size: config.pool_size,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(PoolConfig::unbounded())
    }

    /// Configured capacity, `None` when unbounded
    pub fn max_pool_size(&self) -> Option<usize> {
        self.max_pool_size
    }

    fn read_pool(&self) -> QueueResult<RwLockReadGuard<'_, QueuePool>> {
        handle_rwlock_read(self.queue_pool.read(), |message| {
            QueueError::OperationFailed { message }
        })
    }

    fn write_pool(&self) -> QueueResult<RwLockWriteGuard<'_, QueuePool>> {
        handle_rwlock_write(self.queue_pool.write(), |message| {
            QueueError::OperationFailed { message }
        })
    }

    /// Insert a fresh queue; the caller holds the write guard
    fn register<T: Send + Sync + 'static>(
        &self,
        pool: &mut QueuePool,
        name: &str,
    ) -> QueueResult<Arc<HandoffQueue<T>>> {
        if pool.contains_key(name) {
            return Err(QueueError::ExistQueue {
                name: name.to_string(),
            });
        }
        if let Some(max_pool_size) = self.max_pool_size {
            if pool.len() >= max_pool_size {
                log::debug!(
                    "Refusing to create queue '{}': pool is at capacity {}",
                    name,
                    max_pool_size
                );
                return Err(QueueError::MaximumQueuePoolSize { max_pool_size });
            }
        }

        let queue = Arc::new(HandoffQueue::new(name));
        pool.insert(name.to_string(), Arc::clone(&queue) as Arc<dyn PooledQueue>);
        log::debug!("Created queue '{}' ({} in pool)", name, pool.len());
        Ok(queue)
    }

    /// Create and register a new queue under `name`
    ///
    /// # Errors
    ///
    /// - [`QueueError::ExistQueue`] if `name` is already registered
    /// - [`QueueError::MaximumQueuePoolSize`] if the pool is at capacity
    pub fn set<T: Send + Sync + 'static>(&self, name: &str) -> QueueResult<Arc<HandoffQueue<T>>> {
        let mut pool = self.write_pool()?;
        self.register(&mut pool, name)
    }

    /// Look up a queue without creating it
    ///
    /// A queue registered with another item type is reported as absent.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<HandoffQueue<T>>> {
        let entry = match self.read_pool() {
            Ok(pool) => Arc::clone(pool.get(name)?),
            Err(e) => {
                log::error!("Queue lookup for '{}' failed: {}", name, e);
                return None;
            }
        };

        let queue = downcast_queue::<T>(entry);
        if queue.is_none() {
            log::warn!(
                "Queue '{}' exists but holds items of a different type than '{}'",
                name,
                std::any::type_name::<T>()
            );
        }
        queue
    }

    /// Return the queue registered under `name`, creating it if needed
    ///
    /// Lookup and creation run under the same write guard, so two callers
    /// racing on a new name end up sharing one queue. Capacity still applies.
    pub fn get_or_create<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> QueueResult<Arc<HandoffQueue<T>>> {
        let mut pool = self.write_pool()?;
        match pool.get(name) {
            Some(entry) => {
                downcast_queue::<T>(Arc::clone(entry)).ok_or_else(|| {
                    QueueError::QueueTypeMismatch {
                        name: name.to_string(),
                    }
                })
            }
            None => self.register(&mut pool, name),
        }
    }

    /// Unregister and destroy the queue under `name`; absent names are ignored
    pub fn remove(&self, name: &str) {
        let removed = match self.write_pool() {
            Ok(mut pool) => pool.remove(name),
            Err(e) => {
                log::error!("Failed to remove queue '{}': {}", name, e);
                None
            }
        };

        if let Some(queue) = removed {
            queue.destroy();
            log::debug!("Removed queue '{}'", name);
        }
    }

    /// Remove and destroy every registered queue
    pub fn clear(&self) {
        let drained = match self.write_pool() {
            Ok(mut pool) => std::mem::take(&mut *pool),
            Err(e) => {
                log::error!("Failed to clear queue pool: {}", e);
                return;
            }
        };

        let count = drained.len();
        for queue in drained.into_values() {
            queue.destroy();
        }
        log::debug!("Cleared queue pool ({} queue(s) destroyed)", count);
    }

    pub fn enqueue<T: Send + Sync + 'static>(&self, name: &str, value: T) -> QueueResult<()> {
        self.get_or_create::<T>(name)?.enqueue(value);
        Ok(())
    }

    /// Release the head-of-line item of `name`; a no-op for unknown names
    pub fn dequeue(&self, name: &str) {
        let entry = match self.read_pool() {
            Ok(pool) => pool.get(name).map(Arc::clone),
            Err(e) => {
                log::error!("Dequeue on '{}' failed: {}", name, e);
                None
            }
        };

        match entry {
            Some(queue) => {
                queue.release();
            }
            None => log::trace!("Dequeue on unknown queue '{}' ignored", name),
        }
    }

    pub fn enqueue_and_wait_dequeue<T: Send + Sync + 'static>(
        &self,
        name: &str,
        value: T,
    ) -> QueueResult<DequeueWaiter<T>> {
        Ok(self.get_or_create::<T>(name)?.enqueue_and_wait_dequeue(value))
    }

    pub fn when_ready_to_dequeue<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> QueueResult<Subscription<Arc<QueueItem<T>>>> {
        Ok(self.get_or_create::<T>(name)?.when_ready_to_dequeue())
    }

    pub fn when_dequeued<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> QueueResult<Subscription<Arc<QueueItem<T>>>> {
        Ok(self.get_or_create::<T>(name)?.when_dequeued())
    }

    /// Status transitions of `name`
    ///
    /// Status does not depend on the item type: an existing queue of any type
    /// can be watched, and `T` only types a queue created by this call.
    pub fn status_change<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> QueueResult<Subscription<QueueStatus>> {
        let mut pool = self.write_pool()?;
        if let Some(queue) = pool.get(name) {
            return Ok(queue.status_change());
        }
        Ok(self.register::<T>(&mut pool, name)?.status_change())
    }

    /// Current status of `name`, `None` when it is not registered
    pub fn status(&self, name: &str) -> Option<QueueStatus> {
        self.read_pool().ok()?.get(name).map(|queue| queue.status())
    }

    /// Unreleased item count of `name`, `None` when it is not registered
    pub fn backlog_len(&self, name: &str) -> Option<usize> {
        self.read_pool().ok()?.get(name).map(|queue| queue.backlog_len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read_pool()
            .map(|pool| pool.contains_key(name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.read_pool().map(|pool| pool.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered queue names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .read_pool()
            .map(|pool| pool.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
