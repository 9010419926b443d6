//! VIP Go machine-token authentication
//!
//! This crate provides:
//! - A process secret wrapper and the `SecretProvider` seam
//! - Namespace-bound token derivation (HMAC-SHA256) and timing-safe checks
//! - `Authorization: VIP-MACHINE-TOKEN <token>` header parsing
//! - A verifier that decides accept/reject for a namespace and raw header
//!
//! # Example
//!
//! ```rust
//! use vipgo_auth::{MachineSecret, MachineTokenVerifier, Namespace};
//!
//! let secret = MachineSecret::new("nonce-salt").unwrap();
//! let verifier = MachineTokenVerifier::from_secret(secret);
//! let namespace = Namespace::new("vip/v1").unwrap();
//!
//! let header = verifier.authorization_header(&namespace);
//! assert!(verifier.verify(&namespace, Some(&header)));
//! assert!(!verifier.verify(&namespace, None));
//! ```

pub mod error;
pub mod header;
pub mod secret;
pub mod token;
pub mod verifier;

pub use error::AuthError;
pub use header::{MACHINE_TOKEN_MECHANISM, ParsedAuthorization, format_header, parse_header};
pub use secret::{MachineSecret, SecretProvider};
pub use token::{MachineTokenCodec, Namespace, generate_token, verify_token};
pub use verifier::{MachineTokenVerifier, Verification};
