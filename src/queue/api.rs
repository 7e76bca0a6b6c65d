//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for usage examples and architecture details.

// Core queue components
pub use crate::queue::handoff::HandoffQueue;
pub use crate::queue::pool::QueuePoolManager;

// Items, status and completion handles
pub use crate::queue::item::QueueItem;
pub use crate::queue::status::QueueStatus;
pub use crate::queue::waiter::DequeueWaiter;

// Configuration
pub use crate::queue::config::PoolConfig;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Notification streams returned by queue subscriptions
pub use crate::notifications::api::{NotificationError, Subscription};
