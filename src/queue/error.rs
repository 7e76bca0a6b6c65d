//! Queue Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("The queue {name} already exists.")]
    ExistQueue { name: String },

    #[error("The queue pool has reached its maximum size ({max_pool_size}).")]
    MaximumQueuePoolSize { max_pool_size: usize },

    #[error("The queue {name} was created with a different item type.")]
    QueueTypeMismatch { name: String },

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, QueueError::OperationFailed { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::ExistQueue { .. } => {
                Some("A queue with this name already exists; pick another name or reuse it")
            }
            QueueError::MaximumQueuePoolSize { .. } => {
                Some("The queue pool is full; remove a queue or raise the pool size")
            }
            QueueError::QueueTypeMismatch { .. } => {
                Some("The queue holds a different item type than requested")
            }
            QueueError::OperationFailed { .. } => None,
        }
    }
}
