// HTTP error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Application error with HTTP status code
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a core error, hiding anything unclassified behind `fallback`
    pub fn from_core(err: arena_core::Error, fallback: &str) -> Self {
        use arena_core::Error;

        match err {
            Error::InvalidInput(msg) => Self::bad_request(msg),
            Error::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                Self::internal_server_error(msg)
            }
            other => {
                tracing::error!("{}: {}", fallback, other);
                Self::internal_server_error(fallback)
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            error: self.message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

impl From<arena_core::Error> for AppError {
    fn from(err: arena_core::Error) -> Self {
        Self::from_core(err, "Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err = AppError::from_core(arena_core::Error::InvalidInput("missing".into()), "fallback");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "missing");

        let err = AppError::from_core(
            arena_core::Error::Configuration("LiveKit credentials not configured".into()),
            "fallback",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "LiveKit credentials not configured");

        let err = AppError::from_core(arena_core::Error::Internal("secret detail".into()), "fallback");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "fallback");
    }
}
