// src/models/complaint.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Lifecycle of a complaint. All comparison logic works on this closed enum;
/// display labels live in the i18n table, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "complaint_status", rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    InReview,
    Resolved,
    Rejected,
}

// A complaint as stored.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,

    /// Public tracking number the citizen keeps for follow-up. Distinct from
    /// the storage id.
    #[schema(example = "482913")]
    pub complaint_id: String,

    pub name: String,

    #[schema(example = "29805121301234")]
    pub national_id: String,

    pub governorate: String,
    pub ministry: String,
    pub department: Option<String>,
    pub description: String,

    /// Opaque reference to an attached asset; never interpreted here.
    pub image: Option<String>,

    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

// Citizen submission payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitComplaintPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ahmed Mostafa")]
    pub name: String,

    #[validate(custom(function = "validate_national_id"))]
    #[schema(example = "29805121301234")]
    pub national_id: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Cairo")]
    pub governorate: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Health")]
    pub ministry: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Water Management")]
    pub department: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Sewage leak flooding the street for three days")]
    pub description: String,

    pub image: Option<String>,
}

// 14 ASCII digits, nothing else.
pub fn validate_national_id(value: &str) -> Result<(), ValidationError> {
    if value.len() == 14 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_national_id");
        err.message = Some("invalid_national_id".into());
        Err(err)
    }
}

/// Optional narrowing for listing and dashboard queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintFilter {
    pub governorate: Option<String>,
    pub ministry: Option<String>,
    pub department: Option<String>,
    pub status: Option<ComplaintStatus>,

    /// Newest first instead of insertion order.
    pub recent_first: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    #[schema(example = "RESOLVED")]
    pub status: ComplaintStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitComplaintResponse {
    pub success: bool,
    pub complaint: Complaint,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintResponse {
    pub success: bool,
    pub complaint: Complaint,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintListResponse {
    pub success: bool,
    pub complaints: Vec<Complaint>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_id_accepts_exactly_14_digits() {
        assert!(validate_national_id("29805121301234").is_ok());
    }

    #[test]
    fn national_id_rejects_wrong_lengths_and_non_digits() {
        assert!(validate_national_id("1234567890123").is_err());
        assert!(validate_national_id("123456789012345").is_err());
        assert!(validate_national_id("2980512130123x").is_err());
        assert!(validate_national_id("").is_err());
        // Unicode digits are not ASCII digits.
        assert!(validate_national_id("١٢٣٤٥٦٧٨٩٠١٢٣٤").is_err());
    }

    #[test]
    fn status_serializes_in_wire_format() {
        assert_eq!(
            serde_json::to_string(&ComplaintStatus::InReview).unwrap(),
            "\"IN_REVIEW\""
        );
        assert_eq!(
            serde_json::to_string(&ComplaintStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }

    #[test]
    fn status_deserializes_from_wire_format() {
        let status: ComplaintStatus = serde_json::from_str("\"RESOLVED\"").unwrap();
        assert_eq!(status, ComplaintStatus::Resolved);
    }
}
