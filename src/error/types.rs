// src/error/types.rs
//
// Fatal error channel.
//
// Anything that surfaces as an AppError aborts the run. Recoverable
// conditions (missing local cover art, empty targets) never become an
// AppError; they travel as ResolutionWarning values instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Code mark error: {0}")]
    CodeMark(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document error: {0}")]
    Document(String),
}

impl From<qrcode::types::QrError> for AppError {
    fn from(err: qrcode::types::QrError) -> Self {
        AppError::CodeMark(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
