//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Data-access collaborator failure while computing an aggregate
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Notification collaborator reported a failed send
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Configuration error (fatal before any mentor is processed)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the next scheduled run naturally retries after this error
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::DataAccess(_) | Self::Dispatch(_))
    }
}
