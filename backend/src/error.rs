//! Error handling for the FarmFlow DCRI service
//!
//! Provides consistent JSON error responses. Upstream data failures
//! (weather, soil, model) are normally recovered with defaults before they
//! reach a handler; persistence failures are always surfaced.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Weather service error: {0}")]
    WeatherService(String),

    #[error("Soil service error: {0}")]
    SoilService(String),

    #[error("DCRI model error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Persistence errors
    #[error("Snapshot I/O error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

impl From<shared::ValidationError> for AppError {
    fn from(err: shared::ValidationError) -> Self {
        AppError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().into_keys().collect();
        fields.sort_unstable();

        AppError::Validation {
            field: fields.join(","),
            message: errors.to_string(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::WeatherService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "WEATHER_SERVICE_ERROR".to_string(),
                    message: format!("Weather service error: {}", msg),
                    field: None,
                },
            ),
            AppError::SoilService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "SOIL_SERVICE_ERROR".to_string(),
                    message: format!("Soil service error: {}", msg),
                    field: None,
                },
            ),
            AppError::Model(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "MODEL_ERROR".to_string(),
                    message: format!("DCRI model error: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                },
            ),
            AppError::Persistence(_) | AppError::SnapshotFormat(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "PERSISTENCE_ERROR".to_string(),
                    message: "Crop data could not be saved".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
