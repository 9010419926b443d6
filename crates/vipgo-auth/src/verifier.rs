//! Machine-token verification
//!
//! Checks run cheapest first: header presence, header shape and mechanism
//! name are all settled before any HMAC is computed. The final token
//! comparison is timing-safe.

use crate::header::{format_header, parse_header};
use crate::secret::SecretProvider;
use crate::token::{MachineTokenCodec, Namespace};
use tracing::debug;

/// Terminal state of a verification.
///
/// Only [`Verification::is_authorized`] may drive a response; the
/// rejection reasons exist for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// No `Authorization` header on the request
    NoHeader,
    /// Header present but not `<mechanism> <token>`
    Malformed,
    /// Mechanism is not `VIP-MACHINE-TOKEN`
    MechanismMismatch,
    /// Token was not minted for this namespace under this secret
    TokenMismatch,
    Authorized,
}

impl Verification {
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Verifies `Authorization` headers against a namespace
#[derive(Debug, Clone)]
pub struct MachineTokenVerifier {
    codec: MachineTokenCodec,
}

impl MachineTokenVerifier {
    pub const fn new(codec: MachineTokenCodec) -> Self {
        Self { codec }
    }

    /// Create a verifier that derives tokens from `secret`
    pub fn from_secret(secret: impl SecretProvider + 'static) -> Self {
        Self::new(MachineTokenCodec::new(secret))
    }

    /// The underlying codec
    pub const fn codec(&self) -> &MachineTokenCodec {
        &self.codec
    }

    /// Header value a trusted caller sends to reach `namespace`
    pub fn authorization_header(&self, namespace: &Namespace) -> String {
        format_header(&self.codec.generate(namespace))
    }

    /// Run the verification state machine for a request to `namespace`.
    pub fn evaluate(&self, namespace: &Namespace, header: Option<&str>) -> Verification {
        let Some(raw) = header else {
            return Verification::NoHeader;
        };

        let Ok(parsed) = parse_header(raw) else {
            return Verification::Malformed;
        };

        if !parsed.is_machine_token() {
            return Verification::MechanismMismatch;
        }

        if self.codec.verify(namespace, parsed.token) {
            Verification::Authorized
        } else {
            Verification::TokenMismatch
        }
    }

    /// Whether `header` authorizes a request to `namespace`
    pub fn verify(&self, namespace: &Namespace, header: Option<&str>) -> bool {
        let outcome = self.evaluate(namespace, header);
        if !outcome.is_authorized() {
            debug!(namespace = %namespace, ?outcome, "machine token rejected");
        }
        outcome.is_authorized()
    }
}
