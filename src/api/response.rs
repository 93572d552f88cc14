//! Response types for the payroll API.
//!
//! This module defines the error response structures and maps engine
//! errors onto HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

/// The HTTP status an error kind is reported with.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Aggregation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Config | ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = status_for(error.kind());
        let message = error.to_string();
        let error = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
            EngineError::InvalidPeriod { .. } => ApiError::new("INVALID_PERIOD", message),
            EngineError::MissingRate { .. } => ApiError::new("MISSING_RATE", message),
            EngineError::InvalidAmount { .. } => ApiError::new("INVALID_AMOUNT", message),
            EngineError::InvalidPayItem { .. } => ApiError::new("INVALID_PAY_ITEM", message),
            EngineError::MalformedAttendance { .. } => {
                ApiError::new("MALFORMED_ATTENDANCE", message)
            }
            EngineError::EmployeeNotFound { .. } => ApiError::new("EMPLOYEE_NOT_FOUND", message),
            EngineError::BatchNotFound { .. } => ApiError::new("PAYROLL_NOT_FOUND", message),
            EngineError::PayItemNotFound { .. } => ApiError::new("PAY_ITEM_NOT_FOUND", message),
            EngineError::StatusConflict { .. } => ApiError::new("STATUS_CONFLICT", message),
            EngineError::DuplicateBatch { .. } => ApiError::new("DUPLICATE_PAYROLL", message),
            EngineError::GenerationFailed { source, .. } => {
                ApiError::with_details("GENERATION_FAILED", message, source.to_string())
            }
            EngineError::Storage { .. } => ApiError::with_details(
                "STORAGE_ERROR",
                "Payroll storage is unavailable",
                message,
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayrollStatus;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_status_conflict_maps_to_409() {
        let engine_error = EngineError::StatusConflict {
            batch_id: Uuid::nil(),
            operation: "approve",
            required: PayrollStatus::Draft,
            current: PayrollStatus::Approved,
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "STATUS_CONFLICT");
        assert!(api_error.error.message.contains("approved"));
    }

    #[test]
    fn test_generation_failure_uses_source_status() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let engine_error = EngineError::GenerationFailed {
            employee_id: "emp_001".to_string(),
            period_start: date,
            period_end: date,
            source: Box::new(EngineError::MalformedAttendance {
                employee_id: "emp_001".to_string(),
                date,
                field: "total_hours",
                value: "8h".to_string(),
            }),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "GENERATION_FAILED");
        assert!(api_error.error.details.unwrap().contains("8h"));
    }

    #[test]
    fn test_not_found_and_storage_statuses() {
        let not_found: ApiErrorResponse = EngineError::BatchNotFound {
            batch_id: Uuid::nil(),
        }
        .into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let storage: ApiErrorResponse = EngineError::Storage {
            message: "lock poisoned".to_string(),
        }
        .into();
        assert_eq!(storage.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.error.code, "STORAGE_ERROR");
    }
}
