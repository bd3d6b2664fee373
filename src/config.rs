// src/config.rs

use std::sync::Arc;
use std::time::Duration;
use std::{env, fs};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use utoipa::ToSchema;

use crate::common::error::AppError;
use crate::common::i18n::I18nStore;
use crate::db::{PgAccountRepository, PgComplaintRepository};
use crate::models::account::{AccountRole, CreateAccountPayload};
use crate::services::account_service::AccountService;
use crate::services::auth::AuthService;
use crate::services::complaint_service::ComplaintService;
use crate::services::stats_service::StatsService;

/// Fixed organizational enumerations accepted by the intake form. This is
/// configuration data, not code: a JSON file named by `CATALOG_PATH`
/// replaces the built-in national lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrgCatalog {
    pub governorates: Vec<String>,
    pub ministries: Vec<String>,
}

impl OrgCatalog {
    pub fn load() -> anyhow::Result<Self> {
        match env::var("CATALOG_PATH") {
            Ok(path) => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read catalog file {path}"))?;
                let catalog: OrgCatalog = serde_json::from_str(&raw)
                    .with_context(|| format!("catalog file {path} is not valid JSON"))?;
                Ok(catalog)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn has_governorate(&self, name: &str) -> bool {
        self.governorates.iter().any(|g| g == name)
    }

    pub fn has_ministry(&self, name: &str) -> bool {
        self.ministries.iter().any(|m| m == name)
    }
}

impl Default for OrgCatalog {
    fn default() -> Self {
        Self {
            governorates: GOVERNORATES.iter().map(|g| g.to_string()).collect(),
            ministries: MINISTRIES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

const GOVERNORATES: &[&str] = &[
    "Cairo",
    "Giza",
    "Alexandria",
    "Dakahlia",
    "Red Sea",
    "Beheira",
    "Fayoum",
    "Gharbia",
    "Ismailia",
    "Menofia",
    "Minya",
    "Qalyubia",
    "New Valley",
    "Suez",
    "Aswan",
    "Assiut",
    "Beni Suef",
    "Port Said",
    "Damietta",
    "Sharkia",
    "South Sinai",
    "Kafr El Sheikh",
    "Matrouh",
    "Luxor",
    "Qena",
    "North Sinai",
    "Sohag",
];

const MINISTRIES: &[&str] = &[
    "Health",
    "Education",
    "Higher Education",
    "Interior",
    "Transport",
    "Housing",
    "Electricity",
    "Water Resources and Irrigation",
    "Supply",
    "Social Solidarity",
    "Environment",
    "Communications",
    "Agriculture",
    "Manpower",
    "Culture",
    "Youth and Sports",
    "Justice",
    "Finance",
    "Tourism",
    "Local Development",
];

/// Shared state wired once at startup: the pool, the catalog, the message
/// store and the service graph over the Postgres repositories.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog: Arc<OrgCatalog>,
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub account_service: AccountService,
    pub complaint_service: ComplaintService,
    pub stats_service: StatsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let catalog = Arc::new(OrgCatalog::load()?);

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!("✅ Database connection established");

        // Wire the dependency graph.
        let complaint_repo = Arc::new(PgComplaintRepository::new(db_pool.clone()));
        let account_repo = Arc::new(PgAccountRepository::new(db_pool.clone()));

        let complaint_service = ComplaintService::new(complaint_repo.clone(), catalog.clone());
        let stats_service = StatsService::new(complaint_repo);
        let account_service = AccountService::new(account_repo.clone(), catalog.clone());
        let auth_service = AuthService::new(account_repo, jwt_secret);

        Ok(Self {
            db_pool,
            catalog,
            i18n_store: Arc::new(I18nStore::new()),
            auth_service,
            account_service,
            complaint_service,
            stats_service,
        })
    }
}

/// Seeds the first ministry account when the three `BOOTSTRAP_ADMIN_*`
/// variables are set. Without it a fresh deployment has no way in, since
/// every registry endpoint requires a bearer token.
pub async fn bootstrap_admin(state: &AppState) -> anyhow::Result<()> {
    let (Ok(email), Ok(password), Ok(ministry)) = (
        env::var("BOOTSTRAP_ADMIN_EMAIL"),
        env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        env::var("BOOTSTRAP_ADMIN_MINISTRY"),
    ) else {
        return Ok(());
    };

    let payload = CreateAccountPayload {
        email,
        password,
        role: AccountRole::Ministry,
        department: None,
        governorate: None,
        ministry: Some(ministry),
    };

    match state.account_service.create(payload).await {
        Ok(account) => {
            tracing::info!("👤 bootstrap ministry account {} created", account.email);
            Ok(())
        }
        // Already seeded on an earlier start.
        Err(AppError::EmailAlreadyExists) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("bootstrap account creation failed: {e}")),
    }
}
