//! Complaint lifecycle tests: intake, tracking numbers, follow-up search,
//! status updates and scope enforcement, run against the in-memory store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use shakwa_backend::common::error::AppError;
use shakwa_backend::config::OrgCatalog;
use shakwa_backend::db::{ComplaintRepository, MemoryComplaintRepository};
use shakwa_backend::models::account::{Account, OrgAssignment};
use shakwa_backend::models::complaint::{
    ComplaintFilter, ComplaintStatus, SubmitComplaintPayload,
};
use shakwa_backend::services::complaint_service::ComplaintService;

fn service() -> (ComplaintService, Arc<MemoryComplaintRepository>) {
    let repo = Arc::new(MemoryComplaintRepository::new());
    let service = ComplaintService::new(repo.clone(), Arc::new(OrgCatalog::default()));
    (service, repo)
}

fn payload() -> SubmitComplaintPayload {
    SubmitComplaintPayload {
        name: "Ahmed Mostafa".to_string(),
        national_id: "29805121301234".to_string(),
        governorate: "Cairo".to_string(),
        ministry: "Health".to_string(),
        department: None,
        description: "Sewage leak flooding the street for three days".to_string(),
        image: None,
    }
}

fn ministry_account(ministry: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        email: format!("{}@gov.eg", Uuid::new_v4()),
        password_hash: "hash".to_string(),
        assignment: OrgAssignment::Ministry { ministry: ministry.to_string() },
        banned: false,
        created_at: Utc::now(),
    }
}

fn governorate_account(governorate: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        email: format!("{}@gov.eg", Uuid::new_v4()),
        password_hash: "hash".to_string(),
        assignment: OrgAssignment::Governorate { governorate: governorate.to_string() },
        banned: false,
        created_at: Utc::now(),
    }
}

/// A valid submission is stored as PENDING with a generated id and a
/// tracking number of one to six digits, and can be fetched back by id.
#[tokio::test]
async fn submission_is_stored_pending_with_a_tracking_number() {
    let (service, _) = service();

    let complaint = service.submit(payload()).await.unwrap();
    assert_eq!(complaint.status, ComplaintStatus::Pending);
    assert_eq!(complaint.name, "Ahmed Mostafa");
    assert!(
        !complaint.complaint_id.is_empty() && complaint.complaint_id.len() <= 6,
        "tracking number out of shape: {}",
        complaint.complaint_id
    );
    assert!(complaint.complaint_id.bytes().all(|b| b.is_ascii_digit()));
    assert!(complaint.complaint_id.parse::<u32>().unwrap() < 1_000_000);

    let fetched = service.find(None, complaint.id).await.unwrap();
    assert_eq!(fetched.id, complaint.id);
    assert_eq!(fetched.complaint_id, complaint.complaint_id);
    assert_eq!(fetched.governorate, "Cairo");
    assert_eq!(fetched.ministry, "Health");
}

/// Tracking numbers never repeat across stored complaints.
#[tokio::test]
async fn tracking_numbers_are_unique_across_submissions() {
    let (service, _) = service();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..50 {
        let complaint = service.submit(payload()).await.unwrap();
        assert!(
            seen.insert(complaint.complaint_id.clone()),
            "duplicate tracking number {}",
            complaint.complaint_id
        );
    }
}

/// A national id that is not exactly 14 digits fails validation and leaves
/// no partial record behind.
#[tokio::test]
async fn bad_national_id_is_rejected_without_storing_anything() {
    let (service, repo) = service();

    for national_id in ["123", "298051213012345", "2980512130123x"] {
        let mut bad = payload();
        bad.national_id = national_id.to_string();
        let err = service.submit(bad).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)), "accepted {national_id}");
    }

    let stored = repo.list(&ComplaintFilter::default()).await.unwrap();
    assert!(stored.is_empty(), "rejected submissions must not be stored");
}

/// Required text fields may not be empty.
#[tokio::test]
async fn empty_required_fields_are_rejected() {
    let (service, repo) = service();

    let mut bad = payload();
    bad.description = String::new();
    assert!(matches!(
        service.submit(bad).await.unwrap_err(),
        AppError::ValidationError(_)
    ));

    let mut bad = payload();
    bad.name = String::new();
    assert!(matches!(
        service.submit(bad).await.unwrap_err(),
        AppError::ValidationError(_)
    ));

    assert!(repo.list(&ComplaintFilter::default()).await.unwrap().is_empty());
}

/// Governorate and ministry must come from the catalog.
#[tokio::test]
async fn unknown_organizations_are_rejected() {
    let (service, repo) = service();

    let mut bad = payload();
    bad.governorate = "Atlantis".to_string();
    assert!(matches!(
        service.submit(bad).await.unwrap_err(),
        AppError::UnknownGovernorate(_)
    ));

    let mut bad = payload();
    bad.ministry = "Wizardry".to_string();
    assert!(matches!(
        service.submit(bad).await.unwrap_err(),
        AppError::UnknownMinistry(_)
    ));

    assert!(repo.list(&ComplaintFilter::default()).await.unwrap().is_empty());
}

/// Searching by the full tracking number returns exactly the one complaint.
#[tokio::test]
async fn search_finds_a_complaint_by_its_tracking_number() {
    let (service, _) = service();

    let filed = service.submit(payload()).await.unwrap();
    for _ in 0..5 {
        service.submit(payload()).await.unwrap();
    }

    let found = service.search(&filed.complaint_id).await.unwrap();
    assert!(found.iter().any(|c| c.id == filed.id));
    assert!(found.iter().all(|c| c.complaint_id.contains(&filed.complaint_id)
        || c.national_id.contains(&filed.complaint_id)));
}

/// Search is a substring match over both identifier fields, newest first.
#[tokio::test]
async fn search_matches_substrings_newest_first() {
    let (service, _) = service();

    let mut first = payload();
    first.national_id = "11111111111111".to_string();
    let first = service.submit(first).await.unwrap();

    let mut second = payload();
    second.national_id = "11111111111119".to_string();
    let second = service.submit(second).await.unwrap();

    let found = service.search("1111111111111").await.unwrap();
    assert_eq!(found.len(), 2);
    // Most recent submission comes back first.
    assert_eq!(found[0].id, second.id);
    assert_eq!(found[1].id, first.id);
}

/// Whitespace-only queries are rejected; queries matching nothing return an
/// empty list rather than an error.
#[tokio::test]
async fn search_validates_the_query_but_tolerates_no_matches() {
    let (service, _) = service();
    service.submit(payload()).await.unwrap();

    assert!(matches!(
        service.search("   ").await.unwrap_err(),
        AppError::EmptySearchQuery
    ));
    assert!(matches!(
        service.search("").await.unwrap_err(),
        AppError::EmptySearchQuery
    ));

    let found = service.search("99999999999999").await.unwrap();
    assert!(found.is_empty());
}

/// The query is trimmed before matching, so a padded tracking number still
/// finds its complaint.
#[tokio::test]
async fn search_trims_surrounding_whitespace() {
    let (service, _) = service();
    let filed = service.submit(payload()).await.unwrap();

    let found = service
        .search(&format!("  {}  ", filed.complaint_id))
        .await
        .unwrap();
    assert!(found.iter().any(|c| c.id == filed.id));
}

/// Status transitions are unrestricted: a resolved complaint may go back to
/// pending, a rejected one straight to resolved.
#[tokio::test]
async fn any_status_can_move_to_any_other() {
    let (service, _) = service();
    let reviewer = ministry_account("Health");

    let filed = service.submit(payload()).await.unwrap();

    let steps = [
        ComplaintStatus::Resolved,
        ComplaintStatus::Pending,
        ComplaintStatus::Rejected,
        ComplaintStatus::InReview,
        ComplaintStatus::Resolved,
    ];
    for status in steps {
        let updated = service.update_status(&reviewer, filed.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }
}

/// Updating an unknown id is a not-found, and so is fetching one.
#[tokio::test]
async fn unknown_complaint_ids_are_not_found() {
    let (service, _) = service();
    let reviewer = ministry_account("Health");

    let missing = Uuid::new_v4();
    assert!(matches!(
        service
            .update_status(&reviewer, missing, ComplaintStatus::Resolved)
            .await
            .unwrap_err(),
        AppError::ComplaintNotFound
    ));
    assert!(matches!(
        service.find(None, missing).await.unwrap_err(),
        AppError::ComplaintNotFound
    ));
}

/// Ministry accounts only see and touch complaints filed under their
/// ministry, wherever they were filed geographically.
#[tokio::test]
async fn ministry_accounts_are_confined_to_their_ministry() {
    let (service, _) = service();

    let health = service.submit(payload()).await.unwrap();
    let mut education_payload = payload();
    education_payload.ministry = "Education".to_string();
    let education = service.submit(education_payload).await.unwrap();

    let reviewer = ministry_account("Health");

    let visible = service
        .list(Some(&reviewer), ComplaintFilter::default())
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, health.id);

    // Reading or updating the other ministry's complaint is denied.
    assert!(matches!(
        service.find(Some(&reviewer), education.id).await.unwrap_err(),
        AppError::ScopeDenied
    ));
    assert!(matches!(
        service
            .update_status(&reviewer, education.id, ComplaintStatus::Resolved)
            .await
            .unwrap_err(),
        AppError::ScopeDenied
    ));
}

/// Governorate accounts match on governorate only, across ministries.
#[tokio::test]
async fn governorate_accounts_see_their_whole_governorate() {
    let (service, _) = service();

    service.submit(payload()).await.unwrap();
    let mut giza = payload();
    giza.governorate = "Giza".to_string();
    service.submit(giza).await.unwrap();
    let mut cairo_education = payload();
    cairo_education.ministry = "Education".to_string();
    service.submit(cairo_education).await.unwrap();

    let reviewer = governorate_account("Cairo");
    let visible = service
        .list(Some(&reviewer), ComplaintFilter::default())
        .await
        .unwrap();

    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|c| c.governorate == "Cairo"));
}

/// Asking for a filter outside the account's scope is an authorization
/// error, not an empty page.
#[tokio::test]
async fn filters_outside_the_scope_are_denied() {
    let (service, _) = service();
    service.submit(payload()).await.unwrap();

    let reviewer = ministry_account("Health");
    let request = ComplaintFilter {
        ministry: Some("Education".to_string()),
        ..ComplaintFilter::default()
    };

    assert!(matches!(
        service.list(Some(&reviewer), request).await.unwrap_err(),
        AppError::ScopeDenied
    ));
}

/// Listing keeps insertion order by default and reverses it on request.
#[tokio::test]
async fn listing_order_is_stable_and_reversible() {
    let (service, _) = service();

    let first = service.submit(payload()).await.unwrap();
    let second = service.submit(payload()).await.unwrap();
    let third = service.submit(payload()).await.unwrap();

    let in_order = service.list(None, ComplaintFilter::default()).await.unwrap();
    let ids: Vec<Uuid> = in_order.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);

    let newest_first = service
        .list(
            None,
            ComplaintFilter { recent_first: Some(true), ..ComplaintFilter::default() },
        )
        .await
        .unwrap();
    let ids: Vec<Uuid> = newest_first.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

/// A blank department string on intake is stored as no department at all.
#[tokio::test]
async fn blank_department_collapses_to_none() {
    let (service, _) = service();

    let mut with_blank = payload();
    with_blank.department = Some("   ".to_string());
    let complaint = service.submit(with_blank).await.unwrap();
    assert_eq!(complaint.department, None);

    let mut with_department = payload();
    with_department.department = Some("Hospitals".to_string());
    let complaint = service.submit(with_department).await.unwrap();
    assert_eq!(complaint.department.as_deref(), Some("Hospitals"));
}
