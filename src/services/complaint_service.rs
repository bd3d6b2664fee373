// src/services/complaint_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::common::tracking;
use crate::config::OrgCatalog;
use crate::db::ComplaintRepository;
use crate::models::account::Account;
use crate::models::complaint::{
    Complaint, ComplaintFilter, ComplaintStatus, SubmitComplaintPayload,
};
use crate::services::routing;

/// How many random draws we attempt before giving up on a free tracking
/// number. Failing all of them means the number space is close to full.
const MAX_TRACKING_ATTEMPTS: u32 = 8;

#[derive(Clone)]
pub struct ComplaintService {
    repo: Arc<dyn ComplaintRepository>,
    catalog: Arc<OrgCatalog>,
}

impl ComplaintService {
    pub fn new(repo: Arc<dyn ComplaintRepository>, catalog: Arc<OrgCatalog>) -> Self {
        Self { repo, catalog }
    }

    /// Citizen submission. All validation happens before the single insert;
    /// a rejected payload leaves no trace in the store.
    pub async fn submit(&self, payload: SubmitComplaintPayload) -> Result<Complaint, AppError> {
        payload.validate()?;

        if !self.catalog.has_governorate(&payload.governorate) {
            return Err(AppError::UnknownGovernorate(payload.governorate));
        }
        if !self.catalog.has_ministry(&payload.ministry) {
            return Err(AppError::UnknownMinistry(payload.ministry));
        }

        let complaint_id = self.allocate_tracking_number().await?;
        let complaint = Complaint {
            id: Uuid::new_v4(),
            complaint_id,
            name: payload.name,
            national_id: payload.national_id,
            governorate: payload.governorate,
            ministry: payload.ministry,
            department: payload.department.filter(|d| !d.trim().is_empty()),
            description: payload.description,
            image: payload.image,
            status: ComplaintStatus::Pending,
            created_at: Utc::now(),
        };
        self.repo.insert(&complaint).await?;

        tracing::info!(
            "📨 complaint {} filed under {} / {}",
            complaint.complaint_id,
            complaint.ministry,
            complaint.governorate
        );
        Ok(complaint)
    }

    async fn allocate_tracking_number(&self) -> Result<String, AppError> {
        for _ in 0..MAX_TRACKING_ATTEMPTS {
            let candidate = tracking::generate_tracking_number();
            if !self.repo.tracking_number_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::InternalServerError(anyhow::anyhow!(
            "no free tracking number after {MAX_TRACKING_ATTEMPTS} draws"
        )))
    }

    /// Listing for review screens. Account callers only ever see their own
    /// scope, whatever the filter asks for.
    pub async fn list(
        &self,
        actor: Option<&Account>,
        filter: ComplaintFilter,
    ) -> Result<Vec<Complaint>, AppError> {
        let filter = routing::scoped_filter(actor, filter)?;
        self.repo.list(&filter).await
    }

    pub async fn find(&self, actor: Option<&Account>, id: Uuid) -> Result<Complaint, AppError> {
        let complaint = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ComplaintNotFound)?;

        if let Some(account) = actor {
            if !routing::account_can_access(account, &complaint) {
                return Err(AppError::ScopeDenied);
            }
        }
        Ok(complaint)
    }

    /// Overwrites the status. Deliberately permissive: any status may move
    /// to any other, including back to an earlier one.
    pub async fn update_status(
        &self,
        actor: &Account,
        id: Uuid,
        new_status: ComplaintStatus,
    ) -> Result<Complaint, AppError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ComplaintNotFound)?;

        if !routing::account_can_access(actor, &current) {
            return Err(AppError::ScopeDenied);
        }

        let updated = self
            .repo
            .update_status(id, new_status)
            .await?
            .ok_or(AppError::ComplaintNotFound)?;

        tracing::info!("complaint {} moved to {:?}", updated.complaint_id, updated.status);
        Ok(updated)
    }

    /// Citizen follow-up search: substring match over tracking numbers and
    /// national ids, newest first. Whitespace is trimmed; an empty query is
    /// rejected before touching the store.
    pub async fn search(&self, query: &str) -> Result<Vec<Complaint>, AppError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Err(AppError::EmptySearchQuery);
        }
        self.repo.search(needle).await
    }
}
