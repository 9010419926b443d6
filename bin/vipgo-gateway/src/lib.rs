//! VIP Go Gateway - REST endpoints guarded by machine tokens
//!
//! Route families are nested under their namespace (`/vip/v1/...`) and
//! sit behind a [`auth_middleware::NamespaceGuard`] bound to that
//! namespace. Health checks stay outside any namespace.

pub mod auth_middleware;
pub mod sites;

use auth_middleware::{NamespaceGuard, require_machine_token};
use axum::{Router, http::StatusCode, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use vipgo_auth::{AuthError, MachineTokenVerifier, Namespace};
use vipgo_common::SiteConfig;

/// Namespace of the VIP REST endpoints
pub const VIP_V1: &str = "vip/v1";

/// Shared handler state
#[derive(Debug, Default)]
pub struct AppState {
    pub sites: Vec<SiteConfig>,
}

/// Nest `routes` under `/<namespace>` behind a guard for that namespace
pub fn guarded<S>(
    namespace: Namespace,
    verifier: Arc<MachineTokenVerifier>,
    routes: Router<S>,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let path = format!("/{namespace}");
    let guard = NamespaceGuard::new(namespace, verifier);
    Router::new().nest(
        &path,
        routes.route_layer(middleware::from_fn_with_state(guard, require_machine_token)),
    )
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Build the gateway router
pub fn build_router(
    state: Arc<AppState>,
    verifier: Arc<MachineTokenVerifier>,
) -> Result<Router, AuthError> {
    let vip_v1 = Router::new().route("/sites", get(sites::list_sites));

    Ok(Router::new()
        .route("/health", get(health_check))
        .merge(guarded(Namespace::new(VIP_V1)?, verifier, vip_v1))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
