//! Response types for the worksheet engine API.
//!
//! This module defines the success and error bodies returned by the HTTP
//! API and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::CaseOutputs;

/// Successful response body for `/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Name of the schedule used.
    pub schedule: String,
    /// The calculation result.
    pub result: CaseOutputs,
}

/// Response body for `/schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Schedule name.
    pub name: String,
    /// The date the schedule took effect.
    pub effective_date: NaiveDate,
    /// Where the schedule was published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Number of income rows.
    pub rows: usize,
    /// Child counts the schedule covers.
    pub child_counts: Vec<u32>,
}

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

    /// Creates an unsupported child count error response.
    pub fn unsupported_child_count(count: u32, supported: &[u32]) -> Self {
        let supported: Vec<String> = supported.iter().map(u32::to_string).collect();
        Self::with_details(
            "UNSUPPORTED_CHILD_COUNT",
            format!("Schedule has no obligation column for {} children", count),
            format!("Supported child counts: {}", supported.join(", ")),
        )
    }
}

/// An [`ApiError`] paired with the HTTP status it is returned with.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let details = error.to_string();
        let (status, body) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Schedule could not be loaded", details),
            ),
            EngineError::InvalidSchedule { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("SCHEDULE_ERROR", "Schedule table is invalid", details),
            ),
            EngineError::UnsupportedChildCount { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("UNSUPPORTED_CHILD_COUNT", details),
            ),
            EngineError::CustodyMismatch { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", details),
            ),
            EngineError::InvalidCase { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(details),
            ),
            EngineError::AmountOutOfRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "AMOUNT_OUT_OF_RANGE",
                    "Case amounts are too large to calculate",
                    details,
                ),
            ),
        };
        Self::new(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustodyType;

    #[test]
    fn test_details_omitted_when_absent() {
        let bare = serde_json::to_value(ApiError::malformed_json("bad body")).unwrap();
        assert_eq!(bare["code"], "MALFORMED_JSON");
        assert!(bare.get("details").is_none());

        let detailed =
            serde_json::to_value(ApiError::with_details("SCHEDULE_ERROR", "x", "y")).unwrap();
        assert_eq!(detailed["details"], "y");
    }

    #[test]
    fn test_unsupported_child_count_lists_supported() {
        let error = ApiError::unsupported_child_count(9, &[1, 2, 3]);
        assert_eq!(error.code, "UNSUPPORTED_CHILD_COUNT");
        assert!(error.message.contains('9'));
        assert_eq!(error.details.as_deref(), Some("Supported child counts: 1, 2, 3"));
    }

    #[test]
    fn test_invalid_case_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidCase {
            field: "children".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("children"));
    }

    #[test]
    fn test_amount_out_of_range_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::AmountOutOfRange {
            operation: "Parent 1 portion".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "AMOUNT_OUT_OF_RANGE");
        assert!(api_error.error.details.unwrap().contains("Parent 1 portion"));
    }

    #[test]
    fn test_structural_errors_map_to_server_error() {
        let schedule: ApiErrorResponse = EngineError::InvalidSchedule {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(schedule.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(schedule.error.code, "SCHEDULE_ERROR");

        let mismatch: ApiErrorResponse = EngineError::CustodyMismatch {
            expected: CustodyType::Primary,
            actual: CustodyType::Shared,
        }
        .into();
        assert_eq!(mismatch.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
