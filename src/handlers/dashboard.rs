// src/handlers/dashboard.rs

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::common::error::ApiError;
use crate::config::AppState;
use crate::middleware::auth::AuthenticatedAccount;
use crate::middleware::i18n::Locale;
use crate::models::complaint::{ComplaintFilter, ComplaintStatus};
use crate::models::stats::DashboardStats;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub governorate: Option<String>,
    pub ministry: Option<String>,
    pub department: Option<String>,
    pub status: Option<ComplaintStatus>,

    /// Trailing months in the series (default 6).
    pub months: Option<u32>,
}

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    params(
        ("governorate" = Option<String>, Query, description = "Only this governorate"),
        ("ministry" = Option<String>, Query, description = "Only this ministry"),
        ("department" = Option<String>, Query, description = "Only this department"),
        ("status" = Option<ComplaintStatus>, Query, description = "Only this status"),
        ("months" = Option<u32>, Query, description = "Trailing months in the series (default 6)")
    ),
    responses(
        (status = 200, description = "Totals, monthly series and per-department breakdown over one snapshot", body = DashboardStats),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Filter outside the account's scope")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedAccount(account): AuthenticatedAccount,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = ComplaintFilter {
        governorate: query.governorate,
        ministry: query.ministry,
        department: query.department,
        status: query.status,
        recent_first: None,
    };

    let stats = app_state
        .stats_service
        .dashboard(Some(&account), filter, query.months)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}
