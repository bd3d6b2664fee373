use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

/// Domain error taxonomy. Every user-visible failure carries a
/// distinguishable kind; nothing collapses into a generic message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    /// A field required by the account role is absent or blank.
    #[error("missing required field `{0}` for this role")]
    MissingRoleField(&'static str),

    #[error("account roles are immutable")]
    RoleImmutable,

    #[error("password confirmation does not match")]
    CredentialMismatch,

    #[error("search query is empty")]
    EmptySearchQuery,

    #[error("unknown governorate `{0}`")]
    UnknownGovernorate(String),

    #[error("unknown ministry `{0}`")]
    UnknownMinistry(String),

    #[error("e-mail already registered")]
    EmailAlreadyExists,

    #[error("complaint not found")]
    ComplaintNotFound,

    #[error("account not found")]
    AccountNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    /// Banned accounts keep their rows but lose all access.
    #[error("account suspended")]
    AccountSuspended,

    /// The acting account's organizational scope does not cover the target.
    #[error("account not entitled to act on this complaint")]
    ScopeDenied,

    #[error("database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// (HTTP status, stable wire code, message key).
    fn meta(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::ValidationError(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", "validation_failed")
            }
            AppError::MissingRoleField(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", "missing_role_field")
            }
            AppError::RoleImmutable => {
                (StatusCode::BAD_REQUEST, "validation_error", "role_immutable")
            }
            AppError::CredentialMismatch => {
                (StatusCode::BAD_REQUEST, "validation_error", "credential_mismatch")
            }
            AppError::EmptySearchQuery => {
                (StatusCode::BAD_REQUEST, "validation_error", "empty_query")
            }
            AppError::UnknownGovernorate(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", "unknown_governorate")
            }
            AppError::UnknownMinistry(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", "unknown_ministry")
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "duplicate_email", "duplicate_email")
            }
            AppError::ComplaintNotFound => {
                (StatusCode::NOT_FOUND, "not_found", "complaint_not_found")
            }
            AppError::AccountNotFound => {
                (StatusCode::NOT_FOUND, "not_found", "account_not_found")
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", "invalid_credentials")
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token", "invalid_token")
            }
            AppError::AccountSuspended => {
                (StatusCode::FORBIDDEN, "account_suspended", "account_suspended")
            }
            AppError::ScopeDenied => {
                (StatusCode::FORBIDDEN, "authorization_error", "scope_denied")
            }
            AppError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "storage_error")
            }
            AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal_error")
            }
        }
    }

    /// Per-field details for the response body, message keys resolved
    /// through the catalog.
    fn details(&self, locale: &Locale, i18n: &I18nStore) -> Option<HashMap<String, Vec<String>>> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| {
                            let key = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            i18n.message(locale, &key)
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(details)
            }
            AppError::MissingRoleField(field) => Some(HashMap::from([(
                field.to_string(),
                vec![i18n.message(locale, "required")],
            )])),
            AppError::UnknownGovernorate(value) => Some(HashMap::from([(
                "governorate".to_string(),
                vec![value.clone()],
            )])),
            AppError::UnknownMinistry(value) => Some(HashMap::from([(
                "ministry".to_string(),
                vec![value.clone()],
            )])),
            _ => None,
        }
    }

    /// Localized HTTP presentation. Server-side causes are logged here,
    /// once, before they are dropped from the response.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let (status, code, message_key) = self.meta();
        if status.is_server_error() {
            tracing::error!("🔥 {code}: {self}");
        }
        ApiError {
            status,
            code,
            message: i18n.message(locale, message_key),
            details: self.details(locale, i18n),
        }
    }
}

/// What actually crosses the wire when an operation fails.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "code": self.code,
            "message": self.message,
        });
        if let Some(details) = self.details {
            body["details"] = json!(details);
        }
        (self.status, Json(body)).into_response()
    }
}

// Fallback for paths that never touch the message store; the body carries
// the English description of the variant itself.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, _) = self.meta();
        if status.is_server_error() {
            tracing::error!("🔥 {code}: {self}");
        }
        let body = json!({
            "success": false,
            "code": code,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_kind() {
        let (status, code, _) = AppError::EmailAlreadyExists.meta();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "duplicate_email");

        let (status, _, _) = AppError::ComplaintNotFound.meta();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = AppError::ScopeDenied.meta();
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _, _) = AppError::InvalidCredentials.meta();
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = AppError::EmptySearchQuery.meta();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn localized_error_carries_field_details() {
        let i18n = I18nStore::new();
        let locale = Locale("en".to_string());

        let api_error = AppError::MissingRoleField("ministry").to_api_error(&locale, &i18n);
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        let details = api_error.details.unwrap();
        assert_eq!(details["ministry"], vec!["This field is required.".to_string()]);
    }
}
