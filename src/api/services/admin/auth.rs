//! Admin authentication endpoints

use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{error, info};

use crate::api::jwt::AdminClaims;
use crate::errors::ClinileadError;
use crate::services::AuthService;

use super::super::helpers::{CookieBuilder, error_response, success_response};
use super::super::types::{LoginCredentials, LoginResponse};

/// POST /api/admin/login
///
/// Unknown account and bad password return different statuses (404 vs 401).
/// The admin panel relies on the distinction; this surface is not exposed
/// to anonymous signup, so enumeration is a non-concern.
pub async fn login(
    body: web::Json<LoginCredentials>,
    auth_service: web::Data<AuthService>,
) -> ActixResult<impl Responder> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || body.password.is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Email and password are required",
        ));
    }

    match auth_service.login(&email, &body.password).await {
        Ok(session) => {
            let cookie = CookieBuilder::from_config().build_session_cookie(session.token.clone());
            Ok(HttpResponse::Ok()
                .cookie(cookie)
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(LoginResponse {
                    success: true,
                    token: session.token,
                    user: session.user,
                }))
        }
        Err(e @ ClinileadError::NotFound(_)) => {
            Ok(error_response(StatusCode::NOT_FOUND, e.message()))
        }
        Err(e @ ClinileadError::Unauthorized(_)) => {
            Ok(error_response(StatusCode::UNAUTHORIZED, e.message()))
        }
        Err(e) => {
            error!("Login failed: {}", e);
            Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication error",
            ))
        }
    }
}

/// POST /api/admin/logout
pub async fn logout() -> ActixResult<impl Responder> {
    info!("Admin logout");
    let expired = CookieBuilder::from_config().build_expired_cookie();
    Ok(HttpResponse::Ok()
        .cookie(expired)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(serde_json::json!({ "success": true })))
}

/// GET /api/admin/verify
///
/// The auth middleware already validated the session; claims arrive via
/// request extensions.
pub async fn verify(req: HttpRequest) -> ActixResult<impl Responder> {
    let claims = req.extensions().get::<AdminClaims>().cloned();
    match claims {
        Some(claims) => Ok(success_response(serde_json::json!({
            "userId": claims.sub,
            "role": claims.role,
        }))),
        None => Ok(error_response(StatusCode::UNAUTHORIZED, "No session")),
    }
}
