//! Authentication error types

use thiserror::Error;

/// Machine-token authentication errors.
///
/// These stay inside the process. At the HTTP boundary every variant is
/// reported as the same unauthorized response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("namespace must not be empty")]
    EmptyNamespace,

    #[error("machine secret must not be empty")]
    EmptySecret,

    #[error("missing authorization header")]
    MissingAuthHeader,

    #[error("invalid authorization header format")]
    InvalidAuthHeader,
}
