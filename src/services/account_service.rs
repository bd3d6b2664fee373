// src/services/account_service.rs

use std::sync::Arc;

use bcrypt::hash;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::config::OrgCatalog;
use crate::db::AccountRepository;
use crate::models::account::{
    Account, AccountRole, CreateAccountPayload, OrgAssignment, UpdateAccountPayload,
};

#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
    catalog: Arc<OrgCatalog>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>, catalog: Arc<OrgCatalog>) -> Self {
        Self { repo, catalog }
    }

    pub async fn create(&self, payload: CreateAccountPayload) -> Result<Account, AppError> {
        payload.validate()?;

        let assignment = OrgAssignment::from_parts(
            payload.role,
            payload.department,
            payload.governorate,
            payload.ministry,
        )
        .map_err(AppError::MissingRoleField)?;
        self.check_catalog(&assignment)?;

        // Precheck keeps the registry untouched on duplicates; the unique
        // constraint remains the backstop for concurrent writers.
        if self.repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let password_hash = hash_password(payload.password).await?;
        let account = Account {
            id: Uuid::new_v4(),
            email: payload.email,
            password_hash,
            assignment,
            banned: false,
            created_at: Utc::now(),
        };
        self.repo.insert(&account).await?;

        tracing::info!("account {} created as {:?}", account.email, account.role());
        Ok(account)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateAccountPayload) -> Result<Account, AppError> {
        patch.validate()?;

        let mut account = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        // Roles are fixed at creation; restating the current one is a no-op.
        if let Some(role) = patch.role {
            if role != account.role() {
                return Err(AppError::RoleImmutable);
            }
        }

        if let Some(email) = patch.email {
            if let Some(other) = self.repo.find_by_email(&email).await? {
                if other.id != id {
                    return Err(AppError::EmailAlreadyExists);
                }
            }
            account.email = email;
        }

        if let Some(password) = patch.password {
            if patch.password_confirmation.as_deref() != Some(password.as_str()) {
                return Err(AppError::CredentialMismatch);
            }
            account.password_hash = hash_password(password).await?;
        }

        // Merge org edits over the stored assignment, then re-parse so the
        // role-conditional invariant holds after the update too.
        let merged = OrgAssignment::from_parts(
            account.role(),
            patch
                .department
                .or_else(|| account.assignment.department().map(String::from)),
            patch
                .governorate
                .or_else(|| account.assignment.governorate().map(String::from)),
            patch
                .ministry
                .or_else(|| account.assignment.ministry().map(String::from)),
        )
        .map_err(AppError::MissingRoleField)?;
        self.check_catalog(&merged)?;
        account.assignment = merged;

        self.repo.update(&account).await?;
        Ok(account)
    }

    /// Flips the ban flag; applying it twice restores the original state.
    pub async fn toggle_ban(&self, id: Uuid) -> Result<Account, AppError> {
        let mut account = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        account.banned = !account.banned;
        self.repo.update(&account).await?;

        if account.banned {
            tracing::info!("🚫 account {} banned", account.email);
        } else {
            tracing::info!("account {} unbanned", account.email);
        }
        Ok(account)
    }

    /// Hard delete. Deleting the same id twice is a not-found the second
    /// time.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::AccountNotFound);
        }
        tracing::info!("account {id} deleted");
        Ok(())
    }

    pub async fn list(&self, role: Option<AccountRole>) -> Result<Vec<Account>, AppError> {
        self.repo.list(role).await
    }

    fn check_catalog(&self, assignment: &OrgAssignment) -> Result<(), AppError> {
        if let Some(governorate) = assignment.governorate() {
            if !self.catalog.has_governorate(governorate) {
                return Err(AppError::UnknownGovernorate(governorate.to_string()));
            }
        }
        if let Some(ministry) = assignment.ministry() {
            if !self.catalog.has_ministry(ministry) {
                return Err(AppError::UnknownMinistry(ministry.to_string()));
            }
        }
        Ok(())
    }
}

// Bcrypt is CPU-bound; keep it off the async workers.
async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("hashing task failed: {e}"))??;
    Ok(hashed)
}
