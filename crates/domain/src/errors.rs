//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Time window construction was given unusable bounds
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Mentor", "abc");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Mentor");
                assert_eq!(id, "abc");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn invalid_time_window_message() {
        let err = DomainError::InvalidTimeWindow("stats period must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid time window: stats period must be positive"
        );
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("cohort title is empty".to_string());
        assert_eq!(err.to_string(), "Validation failed: cohort title is empty");
    }
}
