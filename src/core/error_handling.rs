//! Generic error handling utilities
//!
//! Unified top-level error reporting that works across the error types of
//! every module while keeping the detail level appropriate to the audience.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)` with a short, actionable message. When it returns `false`,
/// `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if the caller can fix this (pool full, duplicate name,
    /// malformed script line) rather than it being an internal fault
    fn is_user_actionable(&self) -> bool;

    /// The message to show the user for actionable errors
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their user message; system errors log only the
/// operation context. Full detail always goes to debug level.
///
/// # Examples
/// ```rust,no_run
/// # use handoff_queue::core::error_handling::log_error_with_context;
/// # use handoff_queue::queue::api::QueueError;
/// let err = QueueError::MaximumQueuePoolSize { max_pool_size: 3 };
/// log_error_with_context(&err, "Creating queue");
/// // Logs: "FATAL: The queue pool is full; remove a queue or raise the pool size"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", primary_message(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// The line shown to the user for `error`
pub fn primary_message<'a, E: ContextualError>(error: &'a E, operation_context: &'a str) -> &'a str {
    if error.is_user_actionable() {
        error.user_message().unwrap_or(operation_context)
    } else {
        operation_context
    }
}
