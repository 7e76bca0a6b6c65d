//! Synchronization utilities for robust lock handling
//!
//! Converts lock poisoning into application errors in a consistent manner.

use std::sync::{LockResult, RwLockReadGuard, RwLockWriteGuard};

/// Handle poisoned RwLock read operations with consistent error handling
///
/// RwLocks become poisoned when a writer panics while holding the lock.
///
/// # Examples
/// ```
/// use std::sync::RwLock;
/// use handoff_queue::core::sync::handle_rwlock_read;
/// use handoff_queue::queue::api::QueueError;
///
/// let lock = RwLock::new(42);
/// let guard = handle_rwlock_read(lock.read(), |message| QueueError::OperationFailed { message })
///     .unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_rwlock_read<T, E>(
    result: LockResult<RwLockReadGuard<'_, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockReadGuard<'_, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock read poisoned). This indicates a panic occurred while holding a write lock. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Handle poisoned RwLock write operations with consistent error handling
pub fn handle_rwlock_write<T, E>(
    result: LockResult<RwLockWriteGuard<'_, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockWriteGuard<'_, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock write poisoned). This indicates a panic occurred while holding the lock. PoisonError: {:?}",
            poison_err
        ))
    })
}
