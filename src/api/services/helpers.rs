//! Shared response and cookie helpers

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::api::constants;
use crate::errors::ClinileadError;

use super::types::ApiResponse;

/// Build a JSON envelope response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    data: Option<T>,
    message: Option<String>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            success: status.is_success(),
            data,
            message,
        })
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, Some(data), None)
}

pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response::<()>(status, None, Some(message.to_string()))
}

/// Map a ClinileadError to its HTTP status and message
pub fn error_from_clinilead(err: &ClinileadError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// Session cookie builder
pub struct CookieBuilder {
    secure: bool,
    domain: Option<String>,
    token_days: u64,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        Self {
            secure: config.api.cookie_secure,
            domain: config.api.cookie_domain.clone(),
            token_days: config.api.token_days,
        }
    }

    fn build_cookie_base(
        &self,
        value: String,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(constants::ADMIN_COOKIE_NAME.to_string(), value);
        cookie.set_path("/".to_string());
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(max_age);
        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            token,
            actix_web::cookie::time::Duration::days(self.token_days as i64),
        )
    }

    /// Cleared cookie for logout and failed auth
    pub fn build_expired_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(String::new(), actix_web::cookie::time::Duration::ZERO)
    }
}
