//! Error types for the bdaycal ecosystem.

use thiserror::Error;

/// Errors that can occur in bdaycal operations.
#[derive(Error, Debug)]
pub enum BdayCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bdaycal operations.
pub type BdayCalResult<T> = Result<T, BdayCalError>;
