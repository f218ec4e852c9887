//! Service error taxonomy.
//!
//! Every public operation fails with exactly one of the kinds defined here;
//! no raw store or validation failure ever reaches a caller. Each kind maps
//! to a stable machine-readable code and an HTTP-style status, which the
//! response envelope exposes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// A single field-level validation failure.
///
/// `field` is the dotted path of the offending field (e.g. `address.street`,
/// `tags.3`), `message` a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during customer service operations.
///
/// This is a closed set: the service boundary classifies every lower-level
/// failure into one of these kinds before it is returned.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more fields failed validation.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// The requested customer does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A customer with the same unique key already exists.
    #[error("{0}")]
    AlreadyExists(String),

    /// The store reported a failure unrelated to business rules.
    #[error("Database operation failed: {0}")]
    Persistence(String),

    /// The store connection is not available.
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// An unclassified internal failure. The original message is carried for
    /// debug configurations but withheld from `Display`.
    #[error("An unexpected error occurred")]
    Unknown(String),
}

impl ServiceError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::AlreadyExists(_) => "CUSTOMER_ALREADY_EXISTS",
            Self::Persistence(_) => "DATABASE_ERROR",
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// HTTP-style status code for this kind.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::AlreadyExists(_) => 409,
            Self::Persistence(_) | Self::Connection(_) | Self::Unknown(_) => 500,
        }
    }

    /// Field-level details, present only for validation failures.
    #[must_use]
    pub fn details(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Validation failure for a malformed customer identifier.
    #[must_use]
    pub fn invalid_id() -> Self {
        Self::Validation(vec![FieldError::new("id", "Invalid customer ID format")])
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { field } => {
                Self::AlreadyExists(format!("Customer with this {field} already exists"))
            }
            StoreError::MalformedId(_) => Self::invalid_id(),
            StoreError::NotConnected => Self::Connection("store is not connected".to_owned()),
            StoreError::Backend(msg) => {
                tracing::error!(error = %msg, "store backend failure");
                Self::Persistence(msg)
            }
            StoreError::Corrupted(msg) => {
                tracing::error!(error = %msg, "unclassified store failure");
                Self::Unknown(msg)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_status() {
        let cases: [(ServiceError, &str, u16); 6] = [
            (ServiceError::Validation(vec![]), "VALIDATION_ERROR", 400),
            (
                ServiceError::NotFound("missing".into()),
                "CUSTOMER_NOT_FOUND",
                404,
            ),
            (
                ServiceError::AlreadyExists("dup".into()),
                "CUSTOMER_ALREADY_EXISTS",
                409,
            ),
            (
                ServiceError::Persistence("io".into()),
                "DATABASE_ERROR",
                500,
            ),
            (
                ServiceError::Connection("down".into()),
                "CONNECTION_ERROR",
                500,
            ),
            (ServiceError::Unknown("boom".into()), "UNKNOWN_ERROR", 500),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn test_unknown_display_hides_message() {
        let err = ServiceError::Unknown("index pointer dangling".into());
        assert_eq!(err.to_string(), "An unexpected error occurred");
    }

    #[test]
    fn test_unique_violation_maps_to_already_exists() {
        let err = ServiceError::from(StoreError::UniqueViolation { field: "email" });
        assert!(matches!(err, ServiceError::AlreadyExists(_)));
        assert_eq!(err.to_string(), "Customer with this email already exists");
    }

    #[test]
    fn test_malformed_id_maps_to_validation() {
        let err = ServiceError::from(StoreError::MalformedId("abc".into()));
        let details = err.details().unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details.first().unwrap().field, "id");
    }

    #[test]
    fn test_not_connected_maps_to_connection() {
        let err = ServiceError::from(StoreError::NotConnected);
        assert_eq!(err.code(), "CONNECTION_ERROR");
    }

    #[test]
    fn test_backend_maps_to_persistence() {
        let err = ServiceError::from(StoreError::Backend("disk full".into()));
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.to_string(), "Database operation failed: disk full");
    }

    #[test]
    fn test_corrupted_maps_to_unknown() {
        let err = ServiceError::from(StoreError::Corrupted("dangling index".into()));
        assert_eq!(err.code(), "UNKNOWN_ERROR");
    }
}
