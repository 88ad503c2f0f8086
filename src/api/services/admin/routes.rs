//! Admin API route configuration

use actix_web::web;

use super::auth::{login, logout, verify};
use super::dashboard::get_dashboard;

/// Admin routes mounted under the configured admin prefix
///
/// - POST /login - credential check and session issuance
/// - POST /logout - session cookie clear
/// - GET /verify - session introspection
/// - GET /dashboard - lead aggregates
pub fn admin_routes() -> actix_web::Scope {
    web::scope("")
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/verify", web::get().to(verify))
        .route("/dashboard", web::get().to(get_dashboard))
}
