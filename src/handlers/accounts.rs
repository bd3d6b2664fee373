// src/handlers/accounts.rs

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::common::error::ApiError;
use crate::config::AppState;
use crate::middleware::i18n::Locale;
use crate::models::account::{
    AccountListResponse, AccountResponse, AccountRole, CreateAccountPayload,
    DeleteAccountResponse, UpdateAccountPayload,
};

#[derive(Debug, Deserialize)]
pub struct AccountListQuery {
    /// Restrict the listing to one tier.
    pub role: Option<AccountRole>,
}

// POST /api/accounts
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "Accounts",
    request_body = CreateAccountPayload,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid payload or missing role field"),
        (status = 409, description = "E-mail already registered")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateAccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let account = app_state
        .account_service
        .create(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse { success: true, account }),
    ))
}

// GET /api/accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "Accounts",
    params(
        ("role" = Option<AccountRole>, Query, description = "Restrict the listing to one tier")
    ),
    responses(
        (status = 200, description = "All accounts, optionally narrowed to one tier", body = AccountListResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_accounts(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<AccountListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = app_state
        .account_service
        .list(query.role)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(AccountListResponse { success: true, accounts }),
    ))
}

// PUT /api/accounts/{id}
#[utoipa::path(
    put,
    path = "/api/accounts/{id}",
    tag = "Accounts",
    params(("id" = Uuid, Path, description = "Account id")),
    request_body = UpdateAccountPayload,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 400, description = "Invalid patch, role change or password mismatch"),
        (status = 404, description = "Unknown id"),
        (status = 409, description = "E-mail already registered")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_account(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateAccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let account = app_state
        .account_service
        .update(id, patch)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(AccountResponse { success: true, account }),
    ))
}

// POST /api/accounts/{id}/ban
#[utoipa::path(
    post,
    path = "/api/accounts/{id}/ban",
    tag = "Accounts",
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Ban flag flipped; the body shows the new state", body = AccountResponse),
        (status = 404, description = "Unknown id")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_account_ban(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let account = app_state
        .account_service
        .toggle_ban(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(AccountResponse { success: true, account }),
    ))
}

// DELETE /api/accounts/{id}
#[utoipa::path(
    delete,
    path = "/api/accounts/{id}",
    tag = "Accounts",
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account removed", body = DeleteAccountResponse),
        (status = 404, description = "Unknown id")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_account(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .account_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(DeleteAccountResponse { success: true })))
}
