// src/services/routing.rs

//! Pure routing rules: which organizational scope a complaint belongs to,
//! and which accounts are entitled to handle it. No storage access here.

use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::AppError;
use crate::models::account::{Account, OrgAssignment};
use crate::models::complaint::{Complaint, ComplaintFilter};

/// The scope a complaint was filed under: ministry plus governorate, and
/// optionally the department it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintScope {
    pub ministry: String,
    pub governorate: String,
    pub department: Option<String>,
}

/// Projection of the complaint's own fields; never consults accounts.
pub fn resolve_scope(complaint: &Complaint) -> ComplaintScope {
    ComplaintScope {
        ministry: complaint.ministry.clone(),
        governorate: complaint.governorate.clone(),
        department: complaint.department.clone(),
    }
}

/// Whether one account is entitled to view or act on a complaint.
/// Ministry accounts match on ministry, governorate accounts on
/// governorate, department accounts on all three fields. Banned accounts
/// never match.
pub fn account_can_access(account: &Account, complaint: &Complaint) -> bool {
    if account.banned {
        return false;
    }
    match &account.assignment {
        OrgAssignment::Ministry { ministry } => *ministry == complaint.ministry,
        OrgAssignment::Governorate { governorate } => *governorate == complaint.governorate,
        OrgAssignment::Department {
            department,
            governorate,
            ministry,
        } => {
            complaint.department.as_deref() == Some(department.as_str())
                && *governorate == complaint.governorate
                && *ministry == complaint.ministry
        }
    }
}

/// Every account entitled to handle the complaint.
pub fn matching_accounts<'a>(complaint: &Complaint, accounts: &'a [Account]) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|account| account_can_access(account, complaint))
        .collect()
}

/// Narrows a caller-supplied filter to the account's own scope. Explicitly
/// asking for an organization outside that scope is an authorization
/// failure, not an empty result.
pub fn scoped_filter(
    actor: Option<&Account>,
    mut filter: ComplaintFilter,
) -> Result<ComplaintFilter, AppError> {
    let Some(account) = actor else {
        return Ok(filter);
    };

    match &account.assignment {
        OrgAssignment::Ministry { ministry } => {
            merge_scope_field(&mut filter.ministry, ministry)?;
        }
        OrgAssignment::Governorate { governorate } => {
            merge_scope_field(&mut filter.governorate, governorate)?;
        }
        OrgAssignment::Department {
            department,
            governorate,
            ministry,
        } => {
            merge_scope_field(&mut filter.department, department)?;
            merge_scope_field(&mut filter.governorate, governorate)?;
            merge_scope_field(&mut filter.ministry, ministry)?;
        }
    }

    Ok(filter)
}

fn merge_scope_field(requested: &mut Option<String>, scope_value: &str) -> Result<(), AppError> {
    match requested {
        Some(value) if value != scope_value => Err(AppError::ScopeDenied),
        _ => {
            *requested = Some(scope_value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::complaint::ComplaintStatus;

    fn complaint(governorate: &str, ministry: &str, department: Option<&str>) -> Complaint {
        Complaint {
            id: Uuid::new_v4(),
            complaint_id: "42".to_string(),
            name: "Ahmed".to_string(),
            national_id: "29805121301234".to_string(),
            governorate: governorate.to_string(),
            ministry: ministry.to_string(),
            department: department.map(String::from),
            description: "A broken water main".to_string(),
            image: None,
            status: ComplaintStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn account(assignment: OrgAssignment) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: format!("{}@gov.eg", Uuid::new_v4()),
            password_hash: "hash".to_string(),
            assignment,
            banned: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn scope_mirrors_the_complaint_fields() {
        let scope = resolve_scope(&complaint("Cairo", "Health", Some("Hospitals")));
        assert_eq!(scope.ministry, "Health");
        assert_eq!(scope.governorate, "Cairo");
        assert_eq!(scope.department.as_deref(), Some("Hospitals"));
    }

    #[test]
    fn each_tier_matches_on_its_own_fields() {
        let filed = complaint("Cairo", "Health", Some("Hospitals"));

        let ministry = account(OrgAssignment::Ministry { ministry: "Health".to_string() });
        let governorate =
            account(OrgAssignment::Governorate { governorate: "Cairo".to_string() });
        let department = account(OrgAssignment::Department {
            department: "Hospitals".to_string(),
            governorate: "Cairo".to_string(),
            ministry: "Health".to_string(),
        });

        assert!(account_can_access(&ministry, &filed));
        assert!(account_can_access(&governorate, &filed));
        assert!(account_can_access(&department, &filed));

        let elsewhere = complaint("Giza", "Education", None);
        assert!(!account_can_access(&ministry, &elsewhere));
        assert!(!account_can_access(&governorate, &elsewhere));
        assert!(!account_can_access(&department, &elsewhere));
    }

    #[test]
    fn department_accounts_need_all_three_fields_to_line_up() {
        let department = account(OrgAssignment::Department {
            department: "Hospitals".to_string(),
            governorate: "Cairo".to_string(),
            ministry: "Health".to_string(),
        });

        // Same department name under a different governorate is a different
        // organization.
        assert!(!account_can_access(&department, &complaint("Giza", "Health", Some("Hospitals"))));
        // A complaint with no department never reaches a department account.
        assert!(!account_can_access(&department, &complaint("Cairo", "Health", None)));
    }

    #[test]
    fn banned_accounts_never_match() {
        let filed = complaint("Cairo", "Health", None);
        let mut ministry = account(OrgAssignment::Ministry { ministry: "Health".to_string() });
        assert!(account_can_access(&ministry, &filed));

        ministry.banned = true;
        assert!(!account_can_access(&ministry, &filed));
    }

    #[test]
    fn matching_accounts_collects_every_entitled_tier() {
        let filed = complaint("Cairo", "Health", None);
        let accounts = vec![
            account(OrgAssignment::Ministry { ministry: "Health".to_string() }),
            account(OrgAssignment::Ministry { ministry: "Education".to_string() }),
            account(OrgAssignment::Governorate { governorate: "Cairo".to_string() }),
            account(OrgAssignment::Governorate { governorate: "Giza".to_string() }),
        ];

        let matched = matching_accounts(&filed, &accounts);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|a| account_can_access(a, &filed)));
    }

    #[test]
    fn scoped_filter_pins_the_accounts_organization() {
        let ministry = account(OrgAssignment::Ministry { ministry: "Health".to_string() });

        let filter = scoped_filter(Some(&ministry), ComplaintFilter::default()).unwrap();
        assert_eq!(filter.ministry.as_deref(), Some("Health"));
        assert_eq!(filter.governorate, None);
    }

    #[test]
    fn scoped_filter_rejects_requests_outside_the_scope() {
        let ministry = account(OrgAssignment::Ministry { ministry: "Health".to_string() });

        let request = ComplaintFilter {
            ministry: Some("Education".to_string()),
            ..ComplaintFilter::default()
        };
        let err = scoped_filter(Some(&ministry), request).unwrap_err();
        assert!(matches!(err, AppError::ScopeDenied));
    }

    #[test]
    fn scoped_filter_keeps_compatible_narrowing() {
        let ministry = account(OrgAssignment::Ministry { ministry: "Health".to_string() });

        // A ministry account may still narrow by governorate.
        let request = ComplaintFilter {
            governorate: Some("Cairo".to_string()),
            ..ComplaintFilter::default()
        };
        let filter = scoped_filter(Some(&ministry), request).unwrap();
        assert_eq!(filter.ministry.as_deref(), Some("Health"));
        assert_eq!(filter.governorate.as_deref(), Some("Cairo"));
    }

    #[test]
    fn no_actor_means_no_narrowing() {
        let request = ComplaintFilter {
            ministry: Some("Education".to_string()),
            ..ComplaintFilter::default()
        };
        let filter = scoped_filter(None, request).unwrap();
        assert_eq!(filter.ministry.as_deref(), Some("Education"));
    }
}
