// src/services/auth.rs

use std::sync::Arc;

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::AccountRepository;
use crate::models::account::{Account, Claims};

const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountRepository>, jwt_secret: String) -> Self {
        Self { accounts, jwt_secret }
    }

    /// E-mail and password sign-in for government accounts. Banned accounts
    /// are refused even with correct credentials; unknown e-mails and wrong
    /// passwords are indistinguishable from the outside.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Account), AppError> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = account.password_hash.clone();

        // Bcrypt verification is CPU-bound; run it on a blocking thread.
        let is_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("password verification task failed: {e}"))??;

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }
        if account.banned {
            return Err(AppError::AccountSuspended);
        }

        let token = self.create_token(account.id)?;
        tracing::info!("account {} signed in", account.email);
        Ok((token, account))
    }

    /// Resolves a bearer token back to a live account. The token may still
    /// be within its lifetime, but a banned or deleted account no longer
    /// passes.
    pub async fn validate_token(&self, token: &str) -> Result<Account, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let account = self
            .accounts
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if account.banned {
            return Err(AppError::AccountSuspended);
        }
        Ok(account)
    }

    fn create_token(&self, account_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_LIFETIME_DAYS);

        let claims = Claims {
            sub: account_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
