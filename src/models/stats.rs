// src/models/stats.rs

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Headline counters for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub total: u64,
    pub pending: u64,
    pub resolved: u64,
    pub rejected: u64,
}

/// One bucket of the trailing monthly series, labelled `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyCount {
    #[schema(example = "2026-08")]
    pub month: String,
    pub count: u64,
}

/// Status tally for one department row of the breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentTally {
    pub total: u64,
    pub in_progress: u64,
    pub solved: u64,
    pub rejected: u64,
}

/// Combined dashboard payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub totals: DashboardTotals,
    pub monthly_series: Vec<MonthlyCount>,
    pub per_department_breakdown: BTreeMap<String, DepartmentTally>,
}
