use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("File processing error: {0}")]
    FileProcessing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileProcessing(format!("Failed to read CSV: {}", err))
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::InvalidInput(err.body_text())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Analysis task failed: {}", err))
    }
}

impl AppError {
    /// Short summary for the `message` field of the error envelope.
    pub fn summary(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "Invalid request",
            AppError::UnsupportedFileType(_) => "Unsupported file format, please upload a CSV or Excel file",
            AppError::NotFound(_) => "File does not exist",
            AppError::Io(_) => "Storage failure",
            AppError::Parse(_) => "Malformed data",
            AppError::FileProcessing(_) => "Failed to read the uploaded file",
            AppError::Internal(_) => "Analysis failed",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFileType(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Parse(_) => StatusCode::BAD_REQUEST,
            AppError::FileProcessing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "status": "error",
            "message": self.summary(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
