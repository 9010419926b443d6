//! Local path to canonical remote key mapping
//!
//! Callers address an upload either through the configured uploads base
//! directory or through the content directory. Both forms of the same file
//! map to one `/wp-content/uploads/...` key.

use vipgo_common::FilesConfig;

/// Prefix of every canonical uploads key
pub const CANONICAL_UPLOADS_PREFIX: &str = "/wp-content/uploads";

const CANONICAL_CONTENT_PREFIX: &str = "/wp-content";

/// Strip `dir` from the front of `path` on a component boundary
fn strip_dir<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(dir)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

/// Map a local upload path to its canonical remote key.
///
/// Paths under neither directory are returned unchanged.
pub fn sanitize_path(path: &str, uploads_basedir: &str, content_dir: &str) -> String {
    if let Some(rest) = strip_dir(path, uploads_basedir) {
        return format!("{CANONICAL_UPLOADS_PREFIX}{rest}");
    }
    if let Some(rest) = strip_dir(path, content_dir) {
        return format!("{CANONICAL_CONTENT_PREFIX}{rest}");
    }
    path.to_string()
}

/// The two local roots an upload can be addressed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadsPaths {
    pub uploads_basedir: String,
    pub content_dir: String,
}

impl UploadsPaths {
    pub fn new(uploads_basedir: impl Into<String>, content_dir: impl Into<String>) -> Self {
        Self {
            uploads_basedir: uploads_basedir.into(),
            content_dir: content_dir.into(),
        }
    }

    pub fn from_config(config: &FilesConfig) -> Self {
        Self::new(&config.uploads_basedir, &config.content_dir)
    }

    pub fn sanitize(&self, path: &str) -> String {
        sanitize_path(path, &self.uploads_basedir, &self.content_dir)
    }
}
