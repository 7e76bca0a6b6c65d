//! Aggregate queue status

use strum_macros::{Display, EnumString};

/// Aggregate condition of a [`HandoffQueue`](crate::queue::HandoffQueue)
///
/// String forms are `empty`, `pending` and `destroy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum QueueStatus {
    /// The most recently enqueued item has been released and nothing is waiting
    #[default]
    Empty,
    /// An item is head-of-line, waiting for a release signal
    Pending,
    /// Terminal; the queue publishes nothing after this
    #[strum(to_string = "destroy", serialize = "destroyed")]
    Destroyed,
}

impl QueueStatus {
    pub fn is_terminal(self) -> bool {
        self == QueueStatus::Destroyed
    }
}
