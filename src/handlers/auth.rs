use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::common::error::{ApiError, AppError};
use crate::config::AppState;
use crate::middleware::auth::AuthenticatedAccount;
use crate::middleware::i18n::Locale;
use crate::models::account::{AccountResponse, LoginPayload, LoginResponse};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Signed in; body carries the bearer token", body = LoginResponse),
        (status = 401, description = "Unknown e-mail or wrong password"),
        (status = 403, description = "Account suspended")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (token, account) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse { success: true, token, account }),
    ))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "The account behind the bearer token", body = AccountResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedAccount(account): AuthenticatedAccount) -> impl IntoResponse {
    (StatusCode::OK, Json(AccountResponse { success: true, account }))
}
