/// Error types for the tube service.
///
/// Every failure leaves the service as the uniform envelope
/// `{statusCode, data: null, message, success: false}`.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed identifier, missing field, unsupported query value
    #[error("{0}")]
    BadRequest(String),

    /// Request body, query or path could not be deserialized
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Caller is not the owner and the route reports it explicitly
    #[error("{0}")]
    Forbidden(String),

    /// Absent, or not owned by the caller on routes that mask ownership
    #[error("{0}")]
    NotFound(String),

    /// The media service rejected or failed an upload
    #[error("{0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    status_code: u16,
    data: Option<()>,
    message: String,
    success: bool,
}

impl AppError {
    /// Message safe to show a client. Server-side details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        HttpResponse::build(status).json(ErrorEnvelope {
            status_code: status.as_u16(),
            data: None,
            message: self.public_message(),
            success: false,
        })
    }
}
