//! Error types for input validation and price fetching

use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Rejected submit attempt. Holds one entry per failing field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid input: {}", join_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Returns the message recorded for `field`, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure to obtain a price from the remote API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("request failed for {id}: {message}")]
    Transport { id: String, message: String },

    #[error("HTTP error: {status} for {id}")]
    Status { id: String, status: u16 },

    #[error("failed to parse price response for {id}: {message}")]
    Decode { id: String, message: String },

    #[error("price request for {id} timed out after {after:?}")]
    Timeout { id: String, after: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = ValidationError {
            errors: vec![
                FieldError::new("crypto", "is required"),
                FieldError::new("buyPrice", "must be > 0"),
            ],
        };

        assert_eq!(
            err.to_string(),
            "invalid input: crypto: is required; buyPrice: must be > 0"
        );
        assert_eq!(err.message_for("buyPrice"), Some("must be > 0"));
        assert!(err.message_for("sellPrice").is_none());
    }

    #[test]
    fn test_network_error_messages() {
        let err = NetworkError::Status {
            id: "bitcoin".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "HTTP error: 500 for bitcoin");

        let err = NetworkError::Timeout {
            id: "bitcoin".to_string(),
            after: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "price request for bitcoin timed out after 10s");

        let err = NetworkError::Timeout {
            id: "bitcoin".to_string(),
            after: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "price request for bitcoin timed out after 250ms");
    }
}
