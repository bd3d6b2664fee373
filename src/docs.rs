// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::{config, handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::complaints::submit_complaint,
        handlers::complaints::search_complaints,
        handlers::complaints::list_complaints,
        handlers::complaints::get_complaint,
        handlers::complaints::update_complaint_status,
        handlers::accounts::create_account,
        handlers::accounts::list_accounts,
        handlers::accounts::update_account,
        handlers::accounts::toggle_account_ban,
        handlers::accounts::delete_account,
        handlers::dashboard::get_dashboard_stats,
        handlers::catalog::get_catalog,
    ),
    components(schemas(
        models::complaint::ComplaintStatus,
        models::complaint::Complaint,
        models::complaint::SubmitComplaintPayload,
        models::complaint::UpdateStatusPayload,
        models::complaint::SubmitComplaintResponse,
        models::complaint::ComplaintResponse,
        models::complaint::ComplaintListResponse,
        models::complaint::StatusUpdateResponse,
        models::account::AccountRole,
        models::account::OrgAssignment,
        models::account::Account,
        models::account::CreateAccountPayload,
        models::account::UpdateAccountPayload,
        models::account::LoginPayload,
        models::account::LoginResponse,
        models::account::AccountResponse,
        models::account::AccountListResponse,
        models::account::DeleteAccountResponse,
        models::stats::DashboardTotals,
        models::stats::MonthlyCount,
        models::stats::DepartmentTally,
        models::stats::DashboardStats,
        config::OrgCatalog,
    )),
    tags(
        (name = "Auth", description = "Government account sign-in"),
        (name = "Complaints", description = "Citizen intake, follow-up search and review"),
        (name = "Accounts", description = "Ministry, governorate and department account registry"),
        (name = "Dashboard", description = "Aggregated complaint statistics"),
        (name = "Catalog", description = "Organizational reference data")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
