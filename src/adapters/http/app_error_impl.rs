use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Client errors at info, server errors at error.
        match &self {
            AppError::MissingParameter(_)
            | AppError::InvalidInput(_)
            | AppError::NotFound
            | AppError::KeyExhausted => {
                tracing::info!(error = %self, "Request rejected")
            }
            _ => tracing::error!(error = ?self, "Request failed"),
        }

        match self {
            AppError::MissingParameter(field) => error_resp(
                StatusCode::BAD_REQUEST,
                ErrorCode::MissingParameter,
                Some(format!("{field} is required")),
            ),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, Some(msg))
            }
            AppError::NotFound => error_resp(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                Some("Key not found".into()),
            ),
            AppError::KeyExhausted => error_resp(
                StatusCode::CONFLICT,
                ErrorCode::KeyExhausted,
                Some("Key has no uses remaining".into()),
            ),
            AppError::StorageUnavailable(_) => error_resp(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::StorageUnavailable,
                None,
            ),
            AppError::Database(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError, None)
            }
            AppError::Internal(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, None)
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
