//! API request/response types
//!
//! Response envelopes follow the landing page and admin panel contract:
//! every body carries a `success` flag, with `data`, `errors` or
//! `pagination` alongside as the endpoint requires.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::services::validation::FieldError;
use crate::storage::models::{Lead, LeadRole, LeadStatus, OrganizationSize, TS_EXPORT_PATH};

/// Envelope for single-object responses
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope for validation failures
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ValidationErrorResponse {
    pub success: bool,
    pub errors: Vec<FieldError>,
    pub message: String,
}

/// Envelope for paginated listings
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PaginationInfo {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// Listing query parameters
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct GetLeadsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
}

/// Status update body
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Minimal projection returned after a successful submission
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct LeadProjection {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub created_at: String,
}

impl From<&Lead> for LeadProjection {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.clone(),
            email: lead.email.clone(),
            role: lead.role.map(|r| r.as_ref().to_string()),
            created_at: lead.created_at.to_rfc3339(),
        }
    }
}

/// One row of the admin listing
///
/// Restricted to what the admin table renders; attribution and metadata
/// columns (IP, user agent, UTM, session) stay server-side.
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct LeadListItem {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<LeadRole>,
    pub organization: Option<String>,
    pub organization_size: Option<OrganizationSize>,
    pub status: LeadStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Lead> for LeadListItem {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            role: lead.role,
            organization: lead.organization,
            organization_size: lead.organization_size,
            status: lead.status,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// Login request body
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Login success body
#[derive(Serialize, Clone, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: crate::services::auth_service::AdminProfile,
}

/// Page view beacon body
#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PageViewRequest {
    #[serde(rename = "path")]
    pub page: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    pub referrer: Option<String>,
    #[serde(rename = "screenSize")]
    pub screen_size: Option<String>,
}

/// Page view acknowledgement
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PageViewResponse {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check response
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthChecks {
    pub database: HealthDatabaseCheck,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthDatabaseCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_pages_rounds_up() {
        assert_eq!(PaginationInfo::new(1, 10, 0).pages, 0);
        assert_eq!(PaginationInfo::new(1, 10, 10).pages, 1);
        assert_eq!(PaginationInfo::new(1, 10, 11).pages, 2);
        assert_eq!(PaginationInfo::new(1, 10, 99).pages, 10);
    }

    #[test]
    fn test_pagination_zero_limit_does_not_divide_by_zero() {
        assert_eq!(PaginationInfo::new(1, 0, 5).pages, 5);
    }

    #[test]
    fn export_typescript_types() {
        // Running this test regenerates the admin panel type file:
        // cargo test export_typescript_types -- --nocapture

        PaginationInfo::export_all().expect("Failed to export PaginationInfo");
        GetLeadsQuery::export_all().expect("Failed to export GetLeadsQuery");
        UpdateStatusRequest::export_all().expect("Failed to export UpdateStatusRequest");
        LeadProjection::export_all().expect("Failed to export LeadProjection");
        LeadListItem::export_all().expect("Failed to export LeadListItem");
        LoginCredentials::export_all().expect("Failed to export LoginCredentials");
        PageViewRequest::export_all().expect("Failed to export PageViewRequest");
        HealthResponse::export_all().expect("Failed to export HealthResponse");

        println!("TypeScript types exported to {}", TS_EXPORT_PATH);
    }
}
