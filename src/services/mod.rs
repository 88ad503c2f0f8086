//! Business services sitting between the HTTP layer and storage

pub mod attribution;
pub mod auth_service;
pub mod dashboard_service;
pub mod lead_service;
pub mod tracking_service;
pub mod validation;

pub use attribution::{RequestAttribution, capture_attribution};
pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use lead_service::{LeadService, SubmissionOutcome};
pub use tracking_service::TrackingService;
