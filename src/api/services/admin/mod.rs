//! Admin API endpoints

pub mod auth;
pub mod dashboard;
pub mod routes;

pub use routes::admin_routes;
