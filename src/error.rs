use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The AI endpoint failed or returned something that is not a usable movie list.
    #[error("Generation error: {message}")]
    Generation {
        message: String,
        raw_response: Option<String>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl AppError {
    /// Generation failure without a response body to report
    pub fn generation(message: impl Into<String>) -> Self {
        AppError::Generation {
            message: message.into(),
            raw_response: None,
        }
    }

    /// Generation failure that keeps the raw AI response for diagnosis
    pub fn generation_with_response(message: impl Into<String>, raw: impl Into<String>) -> Self {
        AppError::Generation {
            message: message.into(),
            raw_response: Some(raw.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Generation {
                message,
                raw_response,
            } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": message, "raw_response": raw_response }),
            ),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
            err @ AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, json!({ "error": err.to_string() }))
            }
            err @ (AppError::Configuration(_) | AppError::Io(_) | AppError::Serialization(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": err.to_string() }),
            ),
        };

        tracing::error!(status = %status, body = %body, "Request failed");

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
