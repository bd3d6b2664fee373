// src/handlers/complaints.rs

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::common::error::ApiError;
use crate::config::AppState;
use crate::middleware::auth::AuthenticatedAccount;
use crate::middleware::i18n::Locale;
use crate::models::complaint::{
    ComplaintFilter, ComplaintListResponse, ComplaintResponse, ComplaintStatus,
    StatusUpdateResponse, SubmitComplaintPayload, SubmitComplaintResponse, UpdateStatusPayload,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Tracking number or national id fragment.
    pub q: String,
}

// POST /api/complaints
#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = "Complaints",
    request_body = SubmitComplaintPayload,
    responses(
        (status = 201, description = "Complaint filed; the body carries the public tracking number", body = SubmitComplaintResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn submit_complaint(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SubmitComplaintPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let complaint = app_state
        .complaint_service
        .submit(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitComplaintResponse { success: true, complaint }),
    ))
}

// GET /api/complaints/search?q=...
#[utoipa::path(
    get,
    path = "/api/complaints/search",
    tag = "Complaints",
    params(
        ("q" = String, Query, description = "Tracking number or national id fragment")
    ),
    responses(
        (status = 200, description = "Complaints whose tracking number or national id contains the query, newest first", body = ComplaintListResponse),
        (status = 400, description = "Empty query")
    )
)]
pub async fn search_complaints(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let complaints = app_state
        .complaint_service
        .search(&query.q)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(ComplaintListResponse { success: true, complaints }),
    ))
}

// GET /api/complaints
#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = "Complaints",
    params(
        ("governorate" = Option<String>, Query, description = "Only this governorate"),
        ("ministry" = Option<String>, Query, description = "Only this ministry"),
        ("department" = Option<String>, Query, description = "Only this department"),
        ("status" = Option<ComplaintStatus>, Query, description = "Only this status"),
        ("recentFirst" = Option<bool>, Query, description = "Newest first instead of insertion order")
    ),
    responses(
        (status = 200, description = "Complaints within the caller's scope", body = ComplaintListResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Filter outside the account's scope")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_complaints(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedAccount(account): AuthenticatedAccount,
    Query(filter): Query<ComplaintFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let complaints = app_state
        .complaint_service
        .list(Some(&account), filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(ComplaintListResponse { success: true, complaints }),
    ))
}

// GET /api/complaints/{id}
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    tag = "Complaints",
    params(("id" = Uuid, Path, description = "Storage id of the complaint")),
    responses(
        (status = 200, description = "The complaint", body = ComplaintResponse),
        (status = 403, description = "Outside the account's scope"),
        (status = 404, description = "Unknown id")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_complaint(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedAccount(account): AuthenticatedAccount,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let complaint = app_state
        .complaint_service
        .find(Some(&account), id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(ComplaintResponse { success: true, complaint }),
    ))
}

// PATCH /api/complaints/{id}/status
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/status",
    tag = "Complaints",
    params(("id" = Uuid, Path, description = "Storage id of the complaint")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status overwritten; the message is localized", body = StatusUpdateResponse),
        (status = 403, description = "Outside the account's scope"),
        (status = 404, description = "Unknown id")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_complaint_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedAccount(account): AuthenticatedAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .complaint_service
        .update_status(&account, id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state.i18n_store.status_updated(&locale, updated.status);
    Ok((
        StatusCode::OK,
        Json(StatusUpdateResponse { success: true, message }),
    ))
}
