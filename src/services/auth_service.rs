//! Admin credential check and session issuance

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use ts_rs::TS;

use crate::api::jwt::get_jwt_service;
use crate::errors::{ClinileadError, Result};
use crate::storage::models::TS_EXPORT_PATH;
use crate::storage::SeaOrmStorage;
use crate::utils::password::verify_stored_password;

/// Admin identity included in the login response, never the password
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug)]
pub struct LoginSession {
    pub token: String,
    pub user: AdminProfile,
}

#[derive(Clone)]
pub struct AuthService {
    storage: Arc<SeaOrmStorage>,
}

impl AuthService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Check credentials and mint a session token
    ///
    /// Unknown email and wrong password are distinct failures. This mirrors
    /// the admin panel UX contract; only trusted operators see this surface.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession> {
        let Some(admin) = self.storage.find_admin_by_email(email).await? else {
            warn!(email, "Login attempt for unknown admin account");
            return Err(ClinileadError::not_found("Admin account not found"));
        };

        // Malformed stored hashes fail closed
        if !verify_stored_password(password, &admin.password).unwrap_or(false) {
            warn!(email, "Login attempt with invalid credentials");
            return Err(ClinileadError::unauthorized("Invalid credentials"));
        }

        let token = get_jwt_service().generate_session_token(admin.id, &admin.role)?;
        info!(admin_id = admin.id, "Admin login succeeded");

        Ok(LoginSession {
            token,
            user: AdminProfile {
                id: admin.id,
                name: admin.name,
                email: admin.email,
                role: admin.role,
                created_at: admin.created_at,
            },
        })
    }
}
