// src/db/memory.rs

//! In-memory repositories backing the test suite and local development.
//! Insertion order is preserved, matching what the Postgres stores return
//! without `recent_first`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::{AccountRepository, ComplaintRepository};
use crate::models::account::{Account, AccountRole};
use crate::models::complaint::{Complaint, ComplaintFilter, ComplaintStatus};

#[derive(Default)]
pub struct MemoryComplaintRepository {
    complaints: RwLock<Vec<Complaint>>,
}

impl MemoryComplaintRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &ComplaintFilter, complaint: &Complaint) -> bool {
    if let Some(governorate) = &filter.governorate {
        if &complaint.governorate != governorate {
            return false;
        }
    }
    if let Some(ministry) = &filter.ministry {
        if &complaint.ministry != ministry {
            return false;
        }
    }
    if let Some(department) = &filter.department {
        if complaint.department.as_deref() != Some(department.as_str()) {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if complaint.status != status {
            return false;
        }
    }
    true
}

#[async_trait]
impl ComplaintRepository for MemoryComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), AppError> {
        self.complaints.write().await.push(complaint.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>, AppError> {
        Ok(self.complaints.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, AppError> {
        let complaints = self.complaints.read().await;
        let mut selected: Vec<Complaint> = complaints
            .iter()
            .filter(|c| matches(filter, c))
            .cloned()
            .collect();

        if filter.recent_first.unwrap_or(false) {
            selected.reverse();
        }
        Ok(selected)
    }

    async fn search(&self, needle: &str) -> Result<Vec<Complaint>, AppError> {
        let complaints = self.complaints.read().await;
        Ok(complaints
            .iter()
            .rev()
            .filter(|c| c.national_id.contains(needle) || c.complaint_id.contains(needle))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
    ) -> Result<Option<Complaint>, AppError> {
        let mut complaints = self.complaints.write().await;
        match complaints.iter_mut().find(|c| c.id == id) {
            Some(complaint) => {
                complaint.status = status;
                Ok(Some(complaint.clone()))
            }
            None => Ok(None),
        }
    }

    async fn tracking_number_exists(&self, tracking: &str) -> Result<bool, AppError> {
        Ok(self
            .complaints
            .read()
            .await
            .iter()
            .any(|c| c.complaint_id == tracking))
    }
}

#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AppError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), AppError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .iter()
            .any(|a| a.id != account.id && a.email == account.email)
        {
            return Err(AppError::EmailAlreadyExists);
        }
        match accounts.iter_mut().find(|a| a.id == account.id) {
            Some(slot) => {
                *slot = account.clone();
                Ok(())
            }
            None => Err(AppError::AccountNotFound),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn list(&self, role: Option<AccountRole>) -> Result<Vec<Account>, AppError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .filter(|a| role.is_none_or(|r| a.role() == r))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        Ok(accounts.len() < before)
    }
}
