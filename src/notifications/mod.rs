//! Notification channels
//!
//! Multi-subscriber push channels used by the handoff queue to publish item
//! lifecycle and status notifications. Every subscriber gets its own unbounded
//! buffer, so a slow subscriber never causes another one to miss events.

// Internal modules - all access should go through api module
pub(crate) mod channel;
pub(crate) mod error;
pub(crate) mod gate;

// Public API module - the only public interface for the notification system
pub mod api;

#[cfg(test)]
mod tests;
