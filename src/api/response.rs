//! Response types for the CLT vs PJ Engine API.
//!
//! This module defines the success envelope shared by all endpoints, the
//! error response structures and the mapping from engine errors to HTTP.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::AuditTrace;

/// Envelope around every successful calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse<T> {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Fiscal year of the tables used.
    pub fiscal_year: i32,
    /// The calculation result.
    pub result: T,
    /// Step-by-step explanation of the result.
    pub audit: AuditTrace,
}

impl<T> CalculationResponse<T> {
    /// Wraps a result with a fresh id and timestamp.
    pub fn new(calculation_id: Uuid, fiscal_year: i32, result: T, audit: AuditTrace) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            fiscal_year,
            result,
            audit,
        }
    }
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
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidTable { table, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Invalid tax table '{}'", table),
                    message,
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "Monetary amounts must be between 0 and 1000000000000",
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let engine_error = EngineError::InvalidInput {
            field: "gross_salary".to_string(),
            message: "must not be negative, got -1".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("gross_salary"));
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let engine_error = EngineError::InvalidTable {
            table: "inss".to_string(),
            message: "last bracket must be unbounded".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_envelope_carries_engine_version() {
        let response = CalculationResponse::new(
            Uuid::new_v4(),
            2025,
            "result",
            AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        );

        assert_eq!(response.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(response.fiscal_year, 2025);
    }
}
