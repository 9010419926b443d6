//! Machine-token middleware for namespaced REST routes
//!
//! Each guarded route family carries the namespace it belongs to. The
//! `Authorization` header must hold a token minted for exactly that
//! namespace. Every rejection produces the same 401 response.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use vipgo_auth::{MACHINE_TOKEN_MECHANISM, MachineTokenVerifier, Namespace, Verification};

/// Guard state bound to one namespace
#[derive(Clone)]
pub struct NamespaceGuard {
    namespace: Namespace,
    verifier: Arc<MachineTokenVerifier>,
}

impl NamespaceGuard {
    pub const fn new(namespace: Namespace, verifier: Arc<MachineTokenVerifier>) -> Self {
        Self {
            namespace,
            verifier,
        }
    }

    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn check<B>(&self, request: &Request<B>) -> Verification {
        match request
            .headers()
            .get(header::AUTHORIZATION)
            .map(HeaderValue::to_str)
        {
            None => self.verifier.evaluate(&self.namespace, None),
            Some(Ok(value)) => self.verifier.evaluate(&self.namespace, Some(value)),
            Some(Err(_)) => Verification::Malformed,
        }
    }
}

/// Marker left in request extensions once a machine token was accepted
#[derive(Debug, Clone)]
pub struct MachineAuthorized {
    pub namespace: Namespace,
}

/// Machine-token authentication layer
pub async fn require_machine_token(
    State(guard): State<NamespaceGuard>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Unauthorized> {
    let outcome = guard.check(&request);
    if !outcome.is_authorized() {
        debug!(
            namespace = %guard.namespace,
            path = %request.uri().path(),
            ?outcome,
            "machine token rejected"
        );
        return Err(Unauthorized);
    }

    debug!(namespace = %guard.namespace, "machine token accepted");
    request.extensions_mut().insert(MachineAuthorized {
        namespace: guard.namespace.clone(),
    });
    Ok(next.run(request).await)
}

/// Rejection for any machine-token failure.
///
/// Carries no reason: missing header, bad shape, wrong mechanism and
/// wrong token are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let body = json!({
            "code": "rest_forbidden",
            "message": "Sorry, you are not allowed to do that.",
            "data": { "status": StatusCode::UNAUTHORIZED.as_u16() },
        });

        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, MACHINE_TOKEN_MECHANISM)],
            Json(body),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vipgo_auth::MachineSecret;

    fn guard() -> NamespaceGuard {
        let verifier =
            MachineTokenVerifier::from_secret(MachineSecret::new("nonce-salt").unwrap());
        NamespaceGuard::new(Namespace::new("vip/v1").unwrap(), Arc::new(verifier))
    }

    #[test]
    fn test_check_non_utf8_header() {
        let guard = guard();
        let request = Request::builder()
            .header(
                header::AUTHORIZATION,
                HeaderValue::from_bytes(b"VIP-MACHINE-TOKEN \xff\xfe").unwrap(),
            )
            .body(())
            .unwrap();

        assert_eq!(guard.check(&request), Verification::Malformed);
    }

    #[test]
    fn test_check_reads_authorization_header() {
        let guard = guard();
        let header_value = guard.verifier.authorization_header(guard.namespace());
        let request = Request::builder()
            .header(header::AUTHORIZATION, header_value)
            .body(())
            .unwrap();
        assert_eq!(guard.check(&request), Verification::Authorized);

        let request = Request::builder().body(()).unwrap();
        assert_eq!(guard.check(&request), Verification::NoHeader);
    }

    #[test]
    fn test_unauthorized_response() {
        let response = Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            MACHINE_TOKEN_MECHANISM
        );
    }
}
