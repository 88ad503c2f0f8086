use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info, trace};

use crate::api::constants;
use crate::api::jwt::{AdminClaims, get_jwt_service};
use crate::api::services::helpers::CookieBuilder;
use crate::api::services::types::ApiResponse;

/// Admin session gate
///
/// Protects the admin prefix and the non-public lead routes. Accepts a
/// Bearer header or the session cookie; validated claims land in request
/// extensions for downstream handlers. Unauthenticated browser navigation
/// gets redirected to the login page, API clients get 401 JSON.
#[derive(Clone)]
pub struct AdminAuth;

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let config = crate::config::get_config();
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            admin_prefix: config.routes.admin_prefix.clone(),
            login_page: config.routes.admin_login_page.clone(),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    admin_prefix: String,
    login_page: String,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Paths requiring a valid admin session
    fn is_protected(req: &ServiceRequest, admin_prefix: &str) -> bool {
        let path = req.path();

        if path.starts_with(admin_prefix) {
            // Login must stay reachable without a session
            return path != format!("{}/login", admin_prefix);
        }

        // Lead submission is public, everything else on /api/leads is not
        if path == "/api/leads" {
            return req.method() != Method::POST;
        }
        path.starts_with("/api/leads/")
    }

    fn wants_html(req: &ServiceRequest) -> bool {
        req.headers()
            .get(header::ACCEPT)
            .and_then(|h| h.to_str().ok())
            .is_some_and(|accept| accept.contains("text/html"))
    }

    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    /// Redirect browser navigation to the login page, clearing the stale
    /// cookie and preserving the attempted path in `from`
    fn handle_browser_redirect(req: ServiceRequest, login_page: &str) -> ServiceResponse<EitherBody<B>> {
        let from = req.path().to_string();
        debug!(from = %from, "Redirecting unauthenticated browser to login page");
        let expired = CookieBuilder::from_config().build_expired_cookie();
        let location = format!("{}?from={}", login_page, from);
        req.into_response(
            HttpResponse::Found()
                .append_header((header::LOCATION, location))
                .cookie(expired)
                .finish()
                .map_into_right_body(),
        )
    }

    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Admin authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((header::CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    success: false,
                    data: None,
                    message: Some("Unauthorized: Invalid or missing token".to_string()),
                })
                .map_into_right_body(),
        )
    }

    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    fn extract_cookie_token(req: &ServiceRequest) -> Option<String> {
        req.cookie(constants::ADMIN_COOKIE_NAME)
            .map(|c| c.value().to_string())
    }

    fn validate_token(token: &str) -> Option<AdminClaims> {
        match get_jwt_service().validate_session_token(token) {
            Ok(claims) => {
                trace!("Session token validation successful");
                Some(claims)
            }
            Err(e) => {
                info!("Session token validation failed: {}", e);
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let login_page = self.login_page.clone();
        let protected = Self::is_protected(&req, &self.admin_prefix);

        Box::pin(async move {
            if !protected {
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            let token = Self::extract_bearer_token(&req).or_else(|| Self::extract_cookie_token(&req));

            if let Some(claims) = token.as_deref().and_then(Self::validate_token) {
                req.extensions_mut().insert(claims);
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            if Self::wants_html(&req) {
                return Ok(Self::handle_browser_redirect(req, &login_page));
            }
            Ok(Self::handle_unauthorized(req))
        })
    }
}
