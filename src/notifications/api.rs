//! Public API for the notification system
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::notifications::channel::{Broadcaster, DistinctBroadcaster, Subscription};
pub use crate::notifications::error::NotificationError;
pub use crate::notifications::gate::DistinctGate;
