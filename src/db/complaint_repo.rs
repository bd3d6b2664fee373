// src/db/complaint_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::complaint::{Complaint, ComplaintFilter, ComplaintStatus};

/// Storage seam for complaints. The service layer only ever sees this
/// trait, so tests can swap the Postgres store for the in-memory one.
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn insert(&self, complaint: &Complaint) -> Result<(), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>, AppError>;

    /// Filtered listing; insertion order unless the filter asks for newest
    /// first.
    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, AppError>;

    /// Substring match over national ids and tracking numbers, newest first.
    async fn search(&self, needle: &str) -> Result<Vec<Complaint>, AppError>;

    /// Unconditional overwrite; `None` when the id is unknown.
    async fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
    ) -> Result<Option<Complaint>, AppError>;

    async fn tracking_number_exists(&self, tracking: &str) -> Result<bool, AppError>;
}

/// Postgres-backed complaint store.
#[derive(Clone)]
pub struct PgComplaintRepository {
    pool: PgPool,
}

impl PgComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintRepository for PgComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO complaints
                (id, complaint_id, name, national_id, governorate, ministry,
                 department, description, image, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(complaint.id)
        .bind(&complaint.complaint_id)
        .bind(&complaint.name)
        .bind(&complaint.national_id)
        .bind(&complaint.governorate)
        .bind(&complaint.ministry)
        .bind(&complaint.department)
        .bind(&complaint.description)
        .bind(&complaint.image)
        .bind(complaint.status)
        .bind(complaint.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>, AppError> {
        let complaint =
            sqlx::query_as::<_, Complaint>("SELECT * FROM complaints WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(complaint)
    }

    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM complaints WHERE 1=1");

        if let Some(governorate) = &filter.governorate {
            query.push(" AND governorate = ").push_bind(governorate);
        }
        if let Some(ministry) = &filter.ministry {
            query.push(" AND ministry = ").push_bind(ministry);
        }
        if let Some(department) = &filter.department {
            query.push(" AND department = ").push_bind(department);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }

        if filter.recent_first.unwrap_or(false) {
            query.push(" ORDER BY created_at DESC");
        } else {
            query.push(" ORDER BY created_at ASC");
        }

        let complaints = query
            .build_query_as::<Complaint>()
            .fetch_all(&self.pool)
            .await?;

        Ok(complaints)
    }

    async fn search(&self, needle: &str) -> Result<Vec<Complaint>, AppError> {
        let complaints = sqlx::query_as::<_, Complaint>(
            r#"
            SELECT * FROM complaints
            WHERE strpos(national_id, $1) > 0 OR strpos(complaint_id, $1) > 0
            ORDER BY created_at DESC
            "#,
        )
        .bind(needle)
        .fetch_all(&self.pool)
        .await?;

        Ok(complaints)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
    ) -> Result<Option<Complaint>, AppError> {
        let complaint = sqlx::query_as::<_, Complaint>(
            "UPDATE complaints SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(complaint)
    }

    async fn tracking_number_exists(&self, tracking: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM complaints WHERE complaint_id = $1)",
        )
        .bind(tracking)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
