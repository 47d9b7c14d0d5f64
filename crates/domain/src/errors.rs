//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// Malformed OpenStreetMap identifier
    #[error("Invalid OSM identifier: {0}")]
    InvalidIdentifier(String),

    /// Unknown travel mode name
    #[error("Invalid travel mode: {0}")]
    InvalidTravelMode(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_creates_correct_error() {
        let err = DomainError::validation("radius must be positive");
        match err {
            DomainError::ValidationError(msg) => assert_eq!(msg, "radius must be positive"),
            _ => unreachable!("Expected ValidationError"),
        }
    }

    #[test]
    fn invalid_coordinates_converts() {
        let err: DomainError = InvalidCoordinates.into();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn error_display() {
        let err = DomainError::InvalidIdentifier("area/1".to_string());
        assert_eq!(err.to_string(), "Invalid OSM identifier: area/1");

        let err = DomainError::InvalidTravelMode("teleport".to_string());
        assert!(err.to_string().contains("teleport"));
    }
}
