use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Feed API returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("Unexpected feed payload: {0}")]
    ResponseFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Human-readable message surfaced on the stats snapshot when a
    /// refresh cycle fails. Detail goes to the log, not the display.
    pub fn display_message(&self) -> String {
        match self {
            AppError::Fetch(e) if e.is_timeout() => {
                "Failed to fetch nut stats: feed request timed out. Please try again.".to_string()
            }
            AppError::Fetch(_) | AppError::UpstreamStatus { .. } | AppError::ResponseFormat(_) => {
                "Failed to fetch nut stats. Please try again.".to_string()
            }
            other => format!("Failed to fetch nut stats: {}", other),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            AppError::ResponseFormat(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_type = match self {
            AppError::Fetch(_) => "FetchError",
            AppError::UpstreamStatus { .. } => "FetchError",
            AppError::ResponseFormat(_) => "ResponseFormatError",
            AppError::Validation(_) => "ValidationError",
            AppError::Internal(_) => "InternalError",
        };

        let response = ErrorResponse {
            error: ErrorDetail {
                error_type: error_type.to_string(),
                message: self.to_string(),
            },
        };

        HttpResponse::build(self.status_code()).json(response)
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
