//! Files service abstraction
//!
//! The production implementation is [`crate::HttpFilesApi`]. Keys passed
//! here are already canonical (see [`crate::sanitize_path`]).

use async_trait::async_trait;

use crate::error::ApiError;

/// Request/response access to remotely stored uploads.
///
/// Each call is one independent exchange with the service. Implementations
/// own their timeouts; callers do not retry.
#[async_trait]
pub trait FilesApi: Send + Sync {
    /// Fetch the full contents of a file, byte for byte
    async fn get_file(&self, remote_key: &str) -> Result<Vec<u8>, ApiError>;

    /// Create or replace a file
    async fn upload_file(&self, remote_key: &str, contents: &[u8]) -> Result<(), ApiError>;

    /// Remove a file
    async fn delete_file(&self, remote_key: &str) -> Result<(), ApiError>;

    /// Whether a file exists
    async fn is_file(&self, remote_key: &str) -> Result<bool, ApiError>;
}
