// src/handlers/catalog.rs

use axum::Json;
use axum::extract::State;

use crate::config::{AppState, OrgCatalog};

// GET /api/catalog
#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "Catalog",
    responses(
        (status = 200, description = "Governorates and ministries accepted by the intake form", body = OrgCatalog)
    )
)]
pub async fn get_catalog(State(app_state): State<AppState>) -> Json<OrgCatalog> {
    Json(app_state.catalog.as_ref().clone())
}
