use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete caller input. Always raised before any external call.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Body exceeded the router's size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The skill extraction service could not be reached or returned an error.
    #[error("Extraction unavailable: {0}")]
    ExtractionUnavailable(String),

    /// Neither dynamic resolution nor the fallback produced any required skills.
    #[error("Requirements unavailable: {0}")]
    RequirementsUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code included in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::ExtractionUnavailable(_) => "EXTRACTION_UNAVAILABLE",
            AppError::RequirementsUnavailable(_) => "REQUIREMENTS_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::ExtractionUnavailable(_) | AppError::RequirementsUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match &self {
            AppError::InvalidRequest(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::UnsupportedMediaType(msg) => msg.clone(),
            AppError::Unauthorized(reason) => {
                tracing::debug!("Rejected credentials: {reason}");
                "Not authorized".to_string()
            }
            AppError::ExtractionUnavailable(cause) => {
                tracing::error!("Extraction error: {cause}");
                "AI skill extraction service is currently unavailable.".to_string()
            }
            AppError::RequirementsUnavailable(cause) => {
                tracing::error!("Requirement resolution error: {cause}");
                "Failed to dynamically retrieve job market skills from AI.".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
