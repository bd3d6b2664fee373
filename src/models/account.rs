// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// The three tiers of government accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
pub enum AccountRole {
    Department,
    Governorate,
    Ministry,
}

/// Organizational placement, one variant per tier. Each variant carries
/// exactly the fields its tier requires, so an account with a missing
/// role-conditional field cannot be represented at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrgAssignment {
    Department {
        department: String,
        governorate: String,
        ministry: String,
    },
    Governorate {
        governorate: String,
    },
    Ministry {
        ministry: String,
    },
}

impl OrgAssignment {
    /// Rebuilds the union from flat payload or row fields. Empty and
    /// whitespace-only strings count as missing; fields the tier does not
    /// require are ignored. On failure returns the name of the first
    /// missing field.
    pub fn from_parts(
        role: AccountRole,
        department: Option<String>,
        governorate: Option<String>,
        ministry: Option<String>,
    ) -> Result<Self, &'static str> {
        let department = department.filter(|v| !v.trim().is_empty());
        let governorate = governorate.filter(|v| !v.trim().is_empty());
        let ministry = ministry.filter(|v| !v.trim().is_empty());

        match role {
            AccountRole::Department => Ok(Self::Department {
                department: department.ok_or("department")?,
                governorate: governorate.ok_or("governorate")?,
                ministry: ministry.ok_or("ministry")?,
            }),
            AccountRole::Governorate => Ok(Self::Governorate {
                governorate: governorate.ok_or("governorate")?,
            }),
            AccountRole::Ministry => Ok(Self::Ministry {
                ministry: ministry.ok_or("ministry")?,
            }),
        }
    }

    pub fn role(&self) -> AccountRole {
        match self {
            Self::Department { .. } => AccountRole::Department,
            Self::Governorate { .. } => AccountRole::Governorate,
            Self::Ministry { .. } => AccountRole::Ministry,
        }
    }

    pub fn department(&self) -> Option<&str> {
        match self {
            Self::Department { department, .. } => Some(department),
            _ => None,
        }
    }

    pub fn governorate(&self) -> Option<&str> {
        match self {
            Self::Department { governorate, .. } | Self::Governorate { governorate } => {
                Some(governorate)
            }
            Self::Ministry { .. } => None,
        }
    }

    pub fn ministry(&self) -> Option<&str> {
        match self {
            Self::Department { ministry, .. } | Self::Ministry { ministry } => Some(ministry),
            Self::Governorate { .. } => None,
        }
    }
}

/// A government account from the registry.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,

    // Never leaves the process.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Flattened on the wire: the account object carries `role` plus the
    /// organizational fields of its tier.
    #[serde(flatten)]
    pub assignment: OrgAssignment,

    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn role(&self) -> AccountRole {
        self.assignment.role()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "health.cairo@gov.eg")]
    pub email: String,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,

    pub role: AccountRole,

    #[validate(length(min = 1, message = "required"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub governorate: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub ministry: Option<String>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountPayload {
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: Option<String>,

    /// Must match `password` byte for byte when a new one is supplied.
    pub password_confirmation: Option<String>,

    /// Accepted only when equal to the stored role; roles are immutable.
    pub role: Option<AccountRole>,

    #[validate(length(min = 1, message = "required"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub governorate: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub ministry: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "health.cairo@gov.eg")]
    pub email: String,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub account: Account,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub success: bool,
    pub account: Account,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountListResponse {
    pub success: bool,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteAccountResponse {
    pub success: bool,
}

/// Claims carried inside the bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}
