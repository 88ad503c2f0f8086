//! Domain models shared across services and the HTTP layer

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use ts_rs::TS;

/// Output path for generated TypeScript types (admin panel SPA)
pub const TS_EXPORT_PATH: &str = "../admin-panel/src/services/types.generated.ts";

/// Professional role of a lead (required at submission)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumIter, EnumString, AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadRole {
    Doctor,
    ClinicOwner,
    DiagnosticCenterOwner,
    HospitalAdmin,
    Dentist,
    Pharmacist,
    MedicalStudent,
    Other,
}

/// Organization size bucket (optional at submission)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumIter, EnumString, AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationSize {
    Individual,
    #[serde(rename = "SMALL_2_10")]
    #[strum(serialize = "SMALL_2_10")]
    Small2To10,
    #[serde(rename = "MEDIUM_11_50")]
    #[strum(serialize = "MEDIUM_11_50")]
    Medium11To50,
    #[serde(rename = "LARGE_51_PLUS")]
    #[strum(serialize = "LARGE_51_PLUS")]
    Large51Plus,
}

/// Lead lifecycle status; mutated only by admin action
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumIter, EnumString, AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Rejected,
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Device metadata derived from user-agent parsing
///
/// Fixed-shape record with nullable fields rather than an open-ended map,
/// so the persisted schema stays checkable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceMetadata {
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub screen: Option<String>,
}

/// Full lead record as stored
///
/// Serializes camelCase; the admin panel consumes it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// None for rows predating role capture (UNKNOWN in the dashboard)
    pub role: Option<LeadRole>,
    pub organization: Option<String>,
    pub organization_size: Option<OrganizationSize>,
    pub message: Option<String>,
    pub status: LeadStatus,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub session_id: Option<String>,
    pub landing_page: Option<String>,
    pub screen_size: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Validated + enriched payload ready for insertion
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: LeadRole,
    pub organization: Option<String>,
    pub organization_size: Option<OrganizationSize>,
    pub message: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub session_id: Option<String>,
    pub landing_page: Option<String>,
    pub screen_size: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device: DeviceMetadata,
}

/// Page visit record for tracking writes
#[derive(Debug, Clone, Default)]
pub struct NewPageVisit {
    pub session_id: String,
    pub page: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub screen_size: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Admin user record
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// Stored hash or legacy plaintext; stripped before any response
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_serde_names() {
        let json = serde_json::to_string(&LeadRole::DiagnosticCenterOwner).unwrap();
        assert_eq!(json, "\"DIAGNOSTIC_CENTER_OWNER\"");
        let role: LeadRole = serde_json::from_str("\"CLINIC_OWNER\"").unwrap();
        assert_eq!(role, LeadRole::ClinicOwner);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(LeadRole::from_str("DOCTOR").unwrap(), LeadRole::Doctor);
        assert!(LeadRole::from_str("WIZARD").is_err());
    }

    #[test]
    fn test_org_size_names() {
        assert_eq!(OrganizationSize::Small2To10.as_ref(), "SMALL_2_10");
        assert_eq!(
            OrganizationSize::from_str("LARGE_51_PLUS").unwrap(),
            OrganizationSize::Large51Plus
        );
    }

    #[test]
    fn test_status_default() {
        assert_eq!(LeadStatus::default(), LeadStatus::New);
        assert_eq!(LeadStatus::New.as_ref(), "NEW");
    }
}
