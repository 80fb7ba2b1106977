// JSON error envelope for HTTP handlers
use crate::application::asset_service::ServiceError;
use crate::domain::error::CalcError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// `{ "error": { "code": "...", "message": "..." } }` with a matching status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: ErrorDetail,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            detail: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.detail })).into_response()
    }
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, err.code(), err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::AssetNotFound(_) | ServiceError::SensorNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            ServiceError::AssetExists(_) => {
                ApiError::new(StatusCode::CONFLICT, "conflict", err.to_string())
            }
            ServiceError::InvalidTag(_) => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_input", err.to_string())
            }
            ServiceError::Calc(calc) => calc.into(),
            ServiceError::Repository(e) => {
                tracing::error!(error = %e, "Repository failure");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "asset store unavailable",
                )
            }
        }
    }
}
