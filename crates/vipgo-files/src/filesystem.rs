//! Uploads filesystem backed by the files service
//!
//! Operations never return errors directly. A failed call yields the
//! failure value (`None` or `false`) and leaves the service's structured
//! error on [`VipUploadsFilesystem::errors`].

use std::sync::Arc;
use tracing::warn;
use vipgo_common::FilesConfig;

use crate::api::FilesApi;
use crate::client::HttpFilesApi;
use crate::error::{ApiError, ClientError, ErrorCollector, INVALID_UTF8};
use crate::path::UploadsPaths;

/// Split file contents into lines, each keeping a trailing `\n`.
///
/// Equivalent to splitting on `\n` and appending `\n` to every segment, so
/// content ending in `\n` yields a final `"\n"` element. Empty content
/// yields no lines.
pub fn split_lines(contents: &str) -> Vec<String> {
    if contents.is_empty() {
        return Vec::new();
    }
    contents.split('\n').map(|line| format!("{line}\n")).collect()
}

/// Filesystem view over remotely stored uploads
pub struct VipUploadsFilesystem {
    api: Arc<dyn FilesApi>,
    paths: UploadsPaths,
    errors: ErrorCollector,
}

impl VipUploadsFilesystem {
    pub fn new(api: Arc<dyn FilesApi>, paths: UploadsPaths) -> Self {
        Self {
            api,
            paths,
            errors: ErrorCollector::new(),
        }
    }

    /// Build a filesystem talking to the configured files service
    pub fn from_config(config: &FilesConfig) -> Result<Self, ClientError> {
        let api = HttpFilesApi::from_config(config)?;
        Ok(Self::new(Arc::new(api), UploadsPaths::from_config(config)))
    }

    /// Most recent failure of this filesystem
    pub const fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    pub const fn paths(&self) -> &UploadsPaths {
        &self.paths
    }

    /// Canonical remote key for a local path
    pub fn sanitize_path(&self, path: &str) -> String {
        self.paths.sanitize(path)
    }

    fn record(&self, operation: &str, remote_key: &str, error: ApiError) {
        warn!(
            operation,
            remote_key,
            code = %error.code,
            "files API call failed: {}",
            error.message
        );
        self.errors.add(error);
    }

    /// Read a whole file as raw bytes. `None` on failure.
    pub async fn get_contents_bytes(&self, path: &str) -> Option<Vec<u8>> {
        let remote_key = self.sanitize_path(path);
        self.fetch("get_contents_bytes", &remote_key).await
    }

    /// Read a whole file as text. `None` on failure, including content
    /// that is not valid UTF-8.
    pub async fn get_contents(&self, path: &str) -> Option<String> {
        let remote_key = self.sanitize_path(path);
        let bytes = self.fetch("get_contents", &remote_key).await?;
        match String::from_utf8(bytes) {
            Ok(contents) => Some(contents),
            Err(e) => {
                let error = ApiError::new(
                    INVALID_UTF8,
                    format!("`{remote_key}` is not valid UTF-8: {}", e.utf8_error()),
                );
                self.record("get_contents", &remote_key, error);
                None
            }
        }
    }

    async fn fetch(&self, operation: &str, remote_key: &str) -> Option<Vec<u8>> {
        match self.api.get_file(remote_key).await {
            Ok(contents) => Some(contents),
            Err(e) => {
                self.record(operation, remote_key, e);
                None
            }
        }
    }

    /// Read a file as lines (see [`split_lines`]). `None` on failure.
    pub async fn get_contents_array(&self, path: &str) -> Option<Vec<String>> {
        self.get_contents(path)
            .await
            .map(|contents| split_lines(&contents))
    }

    /// Write a whole file
    pub async fn put_contents(&self, path: &str, contents: &[u8]) -> bool {
        let remote_key = self.sanitize_path(path);
        match self.api.upload_file(&remote_key, contents).await {
            Ok(()) => true,
            Err(e) => {
                self.record("put_contents", &remote_key, e);
                false
            }
        }
    }

    pub async fn delete(&self, path: &str) -> bool {
        let remote_key = self.sanitize_path(path);
        match self.api.delete_file(&remote_key).await {
            Ok(()) => true,
            Err(e) => {
                self.record("delete", &remote_key, e);
                false
            }
        }
    }

    /// Whether a file exists. A failed check counts as absent.
    pub async fn exists(&self, path: &str) -> bool {
        let remote_key = self.sanitize_path(path);
        match self.api.is_file(&remote_key).await {
            Ok(exists) => exists,
            Err(e) => {
                self.record("exists", &remote_key, e);
                false
            }
        }
    }

    /// Uploads only hold files, so this is the same check as [`Self::exists`]
    pub async fn is_file(&self, path: &str) -> bool {
        self.exists(path).await
    }
}
