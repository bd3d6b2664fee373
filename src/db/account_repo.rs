// src/db/account_repo.rs

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::account::{Account, AccountRole, OrgAssignment};

/// Storage seam for the account registry.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Unique-email violations surface as `EmailAlreadyExists`.
    async fn insert(&self, account: &Account) -> Result<(), AppError>;

    /// Full-row overwrite keyed by id. The role column is never touched.
    async fn update(&self, account: &Account) -> Result<(), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError>;

    /// Exact, case-sensitive match.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    async fn list(&self, role: Option<AccountRole>) -> Result<Vec<Account>, AppError>;

    /// `false` when no row with that id existed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

// Flat row shape; the assignment union is rebuilt on the way out.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: AccountRole,
    ministry: Option<String>,
    governorate: Option<String>,
    department: Option<String>,
    banned: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        // A row that violates the role-conditional CHECKs is corruption,
        // not a user error.
        let assignment =
            OrgAssignment::from_parts(row.role, row.department, row.governorate, row.ministry)
                .map_err(|field| {
                    AppError::InternalServerError(anyhow!(
                        "account {} is missing `{field}` for role {:?}",
                        row.id,
                        row.role
                    ))
                })?;

        Ok(Account {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            assignment,
            banned: row.banned,
            created_at: row.created_at,
        })
    }
}

/// Postgres-backed account registry.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key") {
            return AppError::EmailAlreadyExists;
        }
    }
    e.into()
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO accounts
                (id, email, password_hash, role, ministry, governorate,
                 department, banned, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role())
        .bind(account.assignment.ministry())
        .bind(account.assignment.governorate())
        .bind(account.assignment.department())
        .bind(account.banned)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, password_hash = $3, ministry = $4,
                governorate = $5, department = $6, banned = $7
            WHERE id = $1
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.assignment.ministry())
        .bind(account.assignment.governorate())
        .bind(account.assignment.department())
        .bind(account.banned)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AppError::AccountNotFound);
        }

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Account::try_from).transpose()
    }

    async fn list(&self, role: Option<AccountRole>) -> Result<Vec<Account>, AppError> {
        let rows = match role {
            Some(role) => {
                sqlx::query_as::<_, AccountRow>(
                    "SELECT * FROM accounts WHERE role = $1 ORDER BY created_at ASC",
                )
                .bind(role)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts ORDER BY created_at ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
