//! Response types for the lesson salary engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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
    /// A 400 response with a validation error body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::validation_error(body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::TeacherNotFound { .. } => (StatusCode::NOT_FOUND, "TEACHER_NOT_FOUND"),
            EngineError::LessonNotFound { .. } => (StatusCode::NOT_FOUND, "LESSON_NOT_FOUND"),
            EngineError::SalaryNotFound { .. } => (StatusCode::NOT_FOUND, "SALARY_NOT_FOUND"),
            EngineError::SalaryAlreadyPaid { .. } => (StatusCode::CONFLICT, "SALARY_ALREADY_PAID"),
            EngineError::InvalidStatusTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION")
            }
            EngineError::PeriodClosed { .. } => (StatusCode::CONFLICT, "PERIOD_CLOSED"),
            EngineError::InvalidPenaltyConfig { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_PENALTY_CONFIG")
            }
            EngineError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, "INVALID_MONTH"),
            EngineError::InvalidLesson { .. } => (StatusCode::BAD_REQUEST, "INVALID_LESSON"),
            EngineError::InvalidTeacher { .. } => (StatusCode::BAD_REQUEST, "INVALID_TEACHER"),
            EngineError::MissingRate { .. } => (StatusCode::BAD_REQUEST, "MISSING_RATE"),
            EngineError::AmountOverflow { .. } => (StatusCode::BAD_REQUEST, "AMOUNT_OVERFLOW"),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                };
            }
            EngineError::StoreError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR")
            }
        };

        Self {
            status,
            error: ApiError::new(code, message),
        }
    }
}
