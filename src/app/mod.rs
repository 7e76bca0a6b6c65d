//! The `handoffq` command-line driver
//!
//! Runs a line-oriented command script against a [`QueuePoolManager`]
//! and prints the resulting queue notifications.
//!
//! [`QueuePoolManager`]: crate::queue::QueuePoolManager

pub mod cli;
pub mod error;
pub mod session;
pub mod startup;
pub mod styles;
