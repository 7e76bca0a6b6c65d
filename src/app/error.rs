//! Application level errors

use crate::app::cli::config::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::queue::api::QueueError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A script line that could not be parsed
    #[error("{message}")]
    Script { line: usize, message: String },

    /// A script line the queue pool rejected
    #[error("{message}")]
    Queue {
        line: usize,
        message: String,
        #[source]
        source: QueueError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    pub fn script(line: usize, message: impl std::fmt::Display) -> Self {
        AppError::Script {
            line,
            message: format!("line {line}: {message}"),
        }
    }

    pub fn queue(line: usize, source: QueueError) -> Self {
        AppError::Queue {
            line,
            message: format!("line {line}: {source}"),
            source,
        }
    }

    /// Script line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AppError::Script { line, .. } | AppError::Queue { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        self.user_message().is_some()
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Script { message, .. } => Some(message.as_str()),
            AppError::Queue {
                message, source, ..
            } if source.is_user_actionable() => Some(message.as_str()),
            _ => None,
        }
    }
}
