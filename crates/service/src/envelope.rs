//! Uniform success/failure envelope.
//!
//! Every public service operation resolves to a [`ServiceResponse`]; nothing
//! else ever crosses the service boundary. This module is the single place
//! where taxonomy errors are converted into their caller-facing shape.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ServiceError};

/// Pagination metadata attached to list-shaped successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Compute the page window metadata for `total` matching records.
    ///
    /// `page` and `limit` must already be clamped to >= 1.
    #[must_use]
    pub const fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            current_page: page,
            total_pages: total.div_ceil(limit),
            total_count: total,
            has_next_page: page * limit < total,
            has_prev_page: page > 1,
        }
    }
}

/// Caller-facing error shape inside a failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Stable machine-readable code, e.g. `CUSTOMER_NOT_FOUND`.
    pub code: String,
    pub message: String,
    /// Field-level details, present only for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    pub status_code: u16,
}

/// The uniform envelope returned by every service operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ServiceResponse<T> {
    /// Success envelope with data only.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
            error: None,
        }
    }

    /// Success envelope with data and a human-readable message.
    #[must_use]
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Success envelope for a page of results.
    #[must_use]
    pub fn ok_paginated(data: T, pagination: Pagination, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            pagination: Some(pagination),
            ..Self::ok(data)
        }
    }

    /// Failure envelope for a classified service error.
    ///
    /// For [`ServiceError::Unknown`] the original message is exposed only
    /// when `debug` is set; callers otherwise see a generic message.
    #[must_use]
    pub fn failure(err: &ServiceError, debug: bool) -> Self {
        let message = match err {
            ServiceError::Unknown(original) if debug => original.clone(),
            other => other.to_string(),
        };
        Self {
            success: false,
            data: None,
            message: None,
            pagination: None,
            error: Some(ErrorBody {
                code: err.code().to_owned(),
                message,
                details: err.details().map(<[FieldError]>::to_vec),
                status_code: err.status_code(),
            }),
        }
    }

    /// `true` for a success envelope.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Consume the envelope, yielding the data of a success.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_window() {
        // 15 records, page 2 of 10
        let p = Pagination::new(2, 10, 15);
        assert_eq!(p.total_pages, 2);
        assert!(!p.has_next_page);
        assert!(p.has_prev_page);

        let p = Pagination::new(1, 10, 15);
        assert!(p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn test_success_shape() {
        let resp = ServiceResponse::ok_with_message(42, "Customer created successfully");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json.get("success").unwrap(), true);
        assert_eq!(json.get("data").unwrap(), 42);
        assert!(json.get("error").is_none());
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let err = ServiceError::NotFound("Customer with ID abc not found".to_owned());
        let resp = ServiceResponse::<()>::failure(&err, false);
        assert!(!resp.is_success());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json.get("success").unwrap(), false);
        let body = json.get("error").unwrap();
        assert_eq!(body.get("code").unwrap(), "CUSTOMER_NOT_FOUND");
        assert_eq!(body.get("statusCode").unwrap(), 404);
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_validation_failure_carries_details() {
        let err = ServiceError::Validation(vec![FieldError::new(
            "firstName",
            "First name is required",
        )]);
        let resp = ServiceResponse::<()>::failure(&err, false);
        let body = resp.error.unwrap();
        assert_eq!(body.status_code, 400);
        let details = body.details.unwrap();
        assert_eq!(details.first().unwrap().field, "firstName");
    }

    #[test]
    fn test_unknown_message_hidden_unless_debug() {
        let err = ServiceError::Unknown("dangling index entry".to_owned());

        let resp = ServiceResponse::<()>::failure(&err, false);
        assert_eq!(
            resp.error.unwrap().message,
            "An unexpected error occurred"
        );

        let resp = ServiceResponse::<()>::failure(&err, true);
        assert_eq!(resp.error.unwrap().message, "dangling index entry");
    }
}
