//! Error types for the notification system

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    /// Nothing is buffered right now, but more may arrive
    #[error("No notification pending")]
    Empty,

    #[error("Notification channel closed")]
    Closed,
}

impl crate::core::error_handling::ContextualError for NotificationError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}
