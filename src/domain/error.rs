use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    /// The selected file could not be decoded as a spreadsheet container.
    Format(String),
    /// The upload did not receive a response within the configured window.
    UploadTimeout,
    /// The upload endpoint could not be reached.
    UploadConnection(String),
    /// The upload endpoint answered with a non-success status.
    UploadHttp { status: u16, message: String },
    /// The upload endpoint answered successfully but not with JSON.
    UploadProtocol(String),
    /// The record fetch failed or returned a shape we cannot browse.
    Data(String),
    Validation(String),
    Config(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Format(msg) => write!(f, "Cannot read spreadsheet: {}", msg),
            AppError::UploadTimeout => {
                write!(f, "Upload timed out, please try again")
            }
            AppError::UploadConnection(msg) => {
                write!(f, "Cannot reach upload server: {}", msg)
            }
            AppError::UploadHttp { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            AppError::UploadProtocol(msg) => {
                write!(f, "Unexpected server response: {}", msg)
            }
            AppError::Data(msg) => write!(f, "Data error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
