//! Namespace-bound machine tokens
//!
//! A token is `hex(HMAC-SHA256(secret, namespace))`. It carries no
//! timestamp, so the same secret and namespace always produce the same
//! token and nothing has to be stored. Revocation happens by rotating the
//! secret.

use crate::error::AuthError;
use crate::secret::SecretProvider;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Identifier of a family of REST endpoints, e.g. `vip/v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace. The empty string is rejected.
    pub fn new(namespace: impl Into<String>) -> Result<Self, AuthError> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(AuthError::EmptyNamespace);
        }
        Ok(Self(namespace))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the token for `namespace` under `secret`.
pub fn generate_token(namespace: &Namespace, secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(namespace.as_str().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check `candidate` against the token for `namespace`.
///
/// The comparison runs in constant time with respect to token content.
pub fn verify_token(namespace: &Namespace, candidate: &str, secret: &[u8]) -> bool {
    let expected = generate_token(namespace, secret);
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// Token derivation bound to an injected secret
#[derive(Clone)]
pub struct MachineTokenCodec {
    secret: Arc<dyn SecretProvider>,
}

impl MachineTokenCodec {
    pub fn new(secret: impl SecretProvider + 'static) -> Self {
        Self {
            secret: Arc::new(secret),
        }
    }

    /// Token for `namespace`
    pub fn generate(&self, namespace: &Namespace) -> String {
        generate_token(namespace, self.secret.secret_bytes())
    }

    /// Timing-safe check of `candidate` against the token for `namespace`
    pub fn verify(&self, namespace: &Namespace, candidate: &str) -> bool {
        verify_token(namespace, candidate, self.secret.secret_bytes())
    }
}

impl fmt::Debug for MachineTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineTokenCodec").finish_non_exhaustive()
    }
}
