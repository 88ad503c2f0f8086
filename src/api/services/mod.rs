//! HTTP endpoint handlers

pub mod admin;
pub mod health;
pub mod helpers;
pub mod leads;
pub mod tracking;
pub mod types;

pub use health::HealthService;
pub use types::{ApiResponse, PaginatedResponse, PaginationInfo};
