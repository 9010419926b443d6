//! Process secret used to derive machine tokens
//!
//! The secret is provisioned and rotated by the host environment. It is
//! injected into the codec instead of being read from a global, so each
//! test can run with its own secret.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;

/// Source of the shared secret bytes.
pub trait SecretProvider: Send + Sync {
    /// Raw key material for token derivation
    fn secret_bytes(&self) -> &[u8];
}

/// The process-wide machine-token secret.
///
/// `Debug` never prints the value and the memory is zeroed on drop.
#[derive(Clone)]
pub struct MachineSecret(SecretString);

impl MachineSecret {
    /// Wrap a secret value. Empty secrets are rejected.
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        Ok(Self(SecretString::from(secret)))
    }
}

impl SecretProvider for MachineSecret {
    fn secret_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}

impl<P: SecretProvider + ?Sized> SecretProvider for Arc<P> {
    fn secret_bytes(&self) -> &[u8] {
        (**self).secret_bytes()
    }
}

impl fmt::Debug for MachineSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MachineSecret([REDACTED])")
    }
}
