// src/services/stats_service.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use crate::common::error::AppError;
use crate::db::ComplaintRepository;
use crate::models::account::Account;
use crate::models::complaint::{Complaint, ComplaintFilter, ComplaintStatus};
use crate::models::stats::{DashboardStats, DashboardTotals, DepartmentTally, MonthlyCount};
use crate::services::routing;

/// Breakdown bucket for complaints that target no department.
pub const UNSPECIFIED_DEPARTMENT: &str = "unspecified";

const DEFAULT_MONTHS: u32 = 6;
const MAX_MONTHS: u32 = 24;

#[derive(Clone)]
pub struct StatsService {
    complaints: Arc<dyn ComplaintRepository>,
}

impl StatsService {
    pub fn new(complaints: Arc<dyn ComplaintRepository>) -> Self {
        Self { complaints }
    }

    /// Dashboard aggregation over a single snapshot, narrowed to the
    /// caller's scope. All three sections are computed from the same
    /// snapshot so they never disagree with each other.
    pub async fn dashboard(
        &self,
        actor: Option<&Account>,
        filter: ComplaintFilter,
        months: Option<u32>,
    ) -> Result<DashboardStats, AppError> {
        let filter = routing::scoped_filter(actor, filter)?;
        let snapshot = self.complaints.list(&filter).await?;
        let months = months.unwrap_or(DEFAULT_MONTHS).clamp(1, MAX_MONTHS);

        Ok(DashboardStats {
            totals: totals(&snapshot),
            monthly_series: monthly_series(&snapshot, Utc::now(), months),
            per_department_breakdown: per_department_breakdown(&snapshot),
        })
    }
}

/// Headline counters. In-review complaints count only towards the total.
pub fn totals(complaints: &[Complaint]) -> DashboardTotals {
    let mut totals = DashboardTotals {
        total: complaints.len() as u64,
        pending: 0,
        resolved: 0,
        rejected: 0,
    };
    for complaint in complaints {
        match complaint.status {
            ComplaintStatus::Pending => totals.pending += 1,
            ComplaintStatus::Resolved => totals.resolved += 1,
            ComplaintStatus::Rejected => totals.rejected += 1,
            ComplaintStatus::InReview => {}
        }
    }
    totals
}

/// Trailing monthly buckets ending at the reference month: every bucket
/// present even when empty, chronological ascending, labelled `YYYY-MM`.
/// Complaints outside the window are ignored.
pub fn monthly_series(
    complaints: &[Complaint],
    reference: DateTime<Utc>,
    months: u32,
) -> Vec<MonthlyCount> {
    let months = months.max(1);
    let end = month_ordinal(reference);
    let start = end - (months as i32 - 1);

    let mut buckets: Vec<MonthlyCount> = (start..=end)
        .map(|ordinal| MonthlyCount { month: month_label(ordinal), count: 0 })
        .collect();

    for complaint in complaints {
        let ordinal = month_ordinal(complaint.created_at);
        if ordinal >= start && ordinal <= end {
            buckets[(ordinal - start) as usize].count += 1;
        }
    }
    buckets
}

/// Per-department tallies; pending and in-review both count as
/// "in progress", resolved counts as "solved".
pub fn per_department_breakdown(complaints: &[Complaint]) -> BTreeMap<String, DepartmentTally> {
    let mut breakdown: BTreeMap<String, DepartmentTally> = BTreeMap::new();
    for complaint in complaints {
        let department = complaint
            .department
            .clone()
            .unwrap_or_else(|| UNSPECIFIED_DEPARTMENT.to_string());
        let tally = breakdown.entry(department).or_default();

        tally.total += 1;
        match complaint.status {
            ComplaintStatus::Pending | ComplaintStatus::InReview => tally.in_progress += 1,
            ComplaintStatus::Resolved => tally.solved += 1,
            ComplaintStatus::Rejected => tally.rejected += 1,
        }
    }
    breakdown
}

// Months since year zero keeps the window arithmetic trivial.
fn month_ordinal(date: DateTime<Utc>) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_label(ordinal: i32) -> String {
    format!("{:04}-{:02}", ordinal.div_euclid(12), ordinal.rem_euclid(12) + 1)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn complaint_on(
        year: i32,
        month: u32,
        department: Option<&str>,
        status: ComplaintStatus,
    ) -> Complaint {
        Complaint {
            id: Uuid::new_v4(),
            complaint_id: "7".to_string(),
            name: "Ahmed".to_string(),
            national_id: "29805121301234".to_string(),
            governorate: "Cairo".to_string(),
            ministry: "Health".to_string(),
            department: department.map(String::from),
            description: "Streetlight out".to_string(),
            image: None,
            status,
            created_at: Utc.with_ymd_and_hms(year, month, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn totals_count_each_terminal_status_separately() {
        let complaints = vec![
            complaint_on(2026, 8, None, ComplaintStatus::Pending),
            complaint_on(2026, 8, None, ComplaintStatus::Pending),
            complaint_on(2026, 8, None, ComplaintStatus::InReview),
            complaint_on(2026, 8, None, ComplaintStatus::Resolved),
            complaint_on(2026, 8, None, ComplaintStatus::Rejected),
        ];

        let totals = totals(&complaints);
        assert_eq!(totals.total, 5);
        assert_eq!(totals.pending, 2);
        assert_eq!(totals.resolved, 1);
        assert_eq!(totals.rejected, 1);
    }

    #[test]
    fn monthly_series_keeps_empty_buckets_and_drops_old_complaints() {
        // Eight months of history, one complaint each.
        let complaints: Vec<Complaint> = (1..=8)
            .map(|month| complaint_on(2026, month, None, ComplaintStatus::Pending))
            .collect();

        let reference = Utc.with_ymd_and_hms(2026, 8, 25, 0, 0, 0).unwrap();
        let series = monthly_series(&complaints, reference, 6);

        // Six buckets, oldest first; January and February fall outside.
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, "2026-03");
        assert_eq!(series[5].month, "2026-08");
        assert!(series.iter().all(|bucket| bucket.count == 1));
    }

    #[test]
    fn monthly_series_zero_fills_quiet_months() {
        let complaints = vec![
            complaint_on(2026, 5, None, ComplaintStatus::Pending),
            complaint_on(2026, 5, None, ComplaintStatus::Resolved),
            complaint_on(2026, 8, None, ComplaintStatus::Pending),
        ];

        let reference = Utc.with_ymd_and_hms(2026, 8, 25, 0, 0, 0).unwrap();
        let series = monthly_series(&complaints, reference, 6);

        let by_month: Vec<(&str, u64)> = series
            .iter()
            .map(|bucket| (bucket.month.as_str(), bucket.count))
            .collect();
        assert_eq!(
            by_month,
            vec![
                ("2026-03", 0),
                ("2026-04", 0),
                ("2026-05", 2),
                ("2026-06", 0),
                ("2026-07", 0),
                ("2026-08", 1),
            ]
        );
    }

    #[test]
    fn monthly_series_crosses_year_boundaries() {
        let complaints = vec![
            complaint_on(2025, 11, None, ComplaintStatus::Pending),
            complaint_on(2026, 1, None, ComplaintStatus::Pending),
        ];

        let reference = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let series = monthly_series(&complaints, reference, 4);

        assert_eq!(series[0].month, "2025-11");
        assert_eq!(series[0].count, 1);
        assert_eq!(series[2].month, "2026-01");
        assert_eq!(series[2].count, 1);
        assert_eq!(series[3].month, "2026-02");
        assert_eq!(series[3].count, 0);
    }

    #[test]
    fn breakdown_groups_by_department_with_a_bucket_for_none() {
        let complaints = vec![
            complaint_on(2026, 8, Some("Hospitals"), ComplaintStatus::Pending),
            complaint_on(2026, 8, Some("Hospitals"), ComplaintStatus::InReview),
            complaint_on(2026, 8, Some("Hospitals"), ComplaintStatus::Resolved),
            complaint_on(2026, 8, Some("Pharmacies"), ComplaintStatus::Rejected),
            complaint_on(2026, 8, None, ComplaintStatus::Pending),
        ];

        let breakdown = per_department_breakdown(&complaints);

        let hospitals = &breakdown["Hospitals"];
        assert_eq!(hospitals.total, 3);
        assert_eq!(hospitals.in_progress, 2);
        assert_eq!(hospitals.solved, 1);
        assert_eq!(hospitals.rejected, 0);

        assert_eq!(breakdown["Pharmacies"].rejected, 1);
        assert_eq!(breakdown[UNSPECIFIED_DEPARTMENT].total, 1);
    }

    #[test]
    fn breakdown_totals_reconcile_with_headline_totals() {
        let complaints = vec![
            complaint_on(2026, 7, Some("Hospitals"), ComplaintStatus::Pending),
            complaint_on(2026, 7, Some("Pharmacies"), ComplaintStatus::Resolved),
            complaint_on(2026, 8, None, ComplaintStatus::Rejected),
        ];

        let headline = totals(&complaints);
        let breakdown = per_department_breakdown(&complaints);
        let breakdown_sum: u64 = breakdown.values().map(|tally| tally.total).sum();

        assert_eq!(headline.total, breakdown_sum);
    }
}
