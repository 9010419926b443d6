//! `sites` endpoint of the `vip/v1` namespace

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::AppState;
use crate::auth_middleware::MachineAuthorized;

/// Page size of the sites listing
pub const SITES_PER_PAGE: usize = 500;

/// One entry of the sites listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEntry {
    #[serde(rename = "ID")]
    pub id: u64,
    pub domain_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SitesQuery {
    #[serde(default = "first_page")]
    pub page: usize,
}

const fn first_page() -> usize {
    1
}

/// GET /vip/v1/sites
pub async fn list_sites(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<MachineAuthorized>,
    Query(query): Query<SitesQuery>,
) -> Json<Vec<SiteEntry>> {
    let page = query.page.max(1);
    debug!(namespace = %auth.namespace, page, "listing sites");

    let sites = state
        .sites
        .iter()
        .skip((page - 1).saturating_mul(SITES_PER_PAGE))
        .take(SITES_PER_PAGE)
        .map(|site| SiteEntry {
            id: site.id,
            domain_name: site.domain_name.clone(),
        })
        .collect();

    Json(sites)
}
