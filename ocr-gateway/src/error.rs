use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::language::supported_language_names;

/// Every way an `/ocr` request can fail. Each variant is terminal for the
/// request; nothing in the request path retries.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Failed to parse form: {0}")]
    MalformedRequest(String),

    #[error("No file provided")]
    MissingFile,

    #[error(
        "Unsupported language. Supported languages: {}",
        supported_language_names()
    )]
    UnsupportedLanguage(String),

    // The detail is logged, never sent to the client.
    #[error("Failed to read file")]
    FileRead(String),

    #[error("Failed to set language: {0}")]
    LanguageConfiguration(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("OCR processing failed: {0}")]
    Recognition(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MalformedRequest(_)
            | GatewayError::MissingFile
            | GatewayError::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            GatewayError::FileRead(_)
            | GatewayError::LanguageConfiguration(_)
            | GatewayError::ImageLoad(_)
            | GatewayError::Recognition(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            GatewayError::UnsupportedLanguage(lang) => {
                tracing::warn!(lang = %lang, "Rejected unsupported language");
            }
            GatewayError::FileRead(detail) => {
                tracing::error!(error = %detail, "Failed to read uploaded file");
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "OCR request failed");
            }
            _ => {
                tracing::warn!(error = %self, "Rejected OCR request");
            }
        }

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
