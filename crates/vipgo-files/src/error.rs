//! Files service error types

use parking_lot::Mutex;
use thiserror::Error;

/// Requested key does not exist on the files service
pub const FILE_NOT_FOUND: &str = "file-not-found";
/// The request never produced an HTTP response
pub const HTTP_REQUEST_FAILED: &str = "http-request-failed";
/// File was fetched but cannot be read as text
pub const INVALID_UTF8: &str = "invalid-utf8";

/// Structured failure reported by the files service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Failure for a non-success status of `operation`
    pub fn operation_failed(operation: &str, key: &str, status: u16) -> Self {
        Self::new(
            format!("{operation}-failed"),
            format!("Failed to {operation} `{key}` (response code: {status})"),
        )
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == FILE_NOT_FOUND
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(HTTP_REQUEST_FAILED, e.to_string())
    }
}

/// Errors building a files service client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid files API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Config(#[from] vipgo_common::Error),

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Keeps the most recent failure of a filesystem for later inspection
#[derive(Debug, Default)]
pub struct ErrorCollector {
    last: Mutex<Option<ApiError>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure, replacing any earlier one
    pub fn add(&self, error: ApiError) {
        *self.last.lock() = Some(error);
    }

    /// Record a failure from its parts
    pub fn add_error(&self, code: impl Into<String>, message: impl Into<String>) {
        self.add(ApiError::new(code, message));
    }

    pub fn get_error_code(&self) -> Option<String> {
        self.last.lock().as_ref().map(|e| e.code.clone())
    }

    pub fn get_error_message(&self) -> Option<String> {
        self.last.lock().as_ref().map(|e| e.message.clone())
    }

    pub fn last_error(&self) -> Option<ApiError> {
        self.last.lock().clone()
    }

    pub fn has_errors(&self) -> bool {
        self.last.lock().is_some()
    }

    pub fn clear(&self) {
        *self.last.lock() = None;
    }
}
