//! Session gate middleware tests
//!
//! Verifies which routes require an admin session, Bearer and cookie
//! token acceptance, and the browser-vs-API unauthenticated split.

use std::sync::Once;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, web};
use serde_json::Value;

use clinilead::api::constants::ADMIN_COOKIE_NAME;
use clinilead::api::jwt::{AdminClaims, get_jwt_service};
use clinilead::api::middleware::AdminAuth;
use clinilead::config::init_config;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn gated_ok(req: HttpRequest) -> HttpResponse {
    let claims = req.extensions().get::<AdminClaims>().cloned();
    match claims {
        Some(claims) => HttpResponse::Ok().json(serde_json::json!({ "sub": claims.sub })),
        None => HttpResponse::Ok().json(serde_json::json!({ "sub": Value::Null })),
    }
}

macro_rules! gated_app {
    () => {{
        init_test_config();
        test::init_service(
            App::new()
                .wrap(AdminAuth)
                .route("/api/leads", web::get().to(gated_ok))
                .route("/api/leads", web::post().to(gated_ok))
                .route("/api/leads/{id}/status", web::patch().to(gated_ok))
                .route("/api/admin/login", web::post().to(gated_ok))
                .route("/api/admin/verify", web::get().to(gated_ok))
                .route("/api/tracking/pageview", web::post().to(gated_ok))
                .route("/health", web::get().to(gated_ok)),
        )
        .await
    }};
}

#[tokio::test]
async fn test_lead_listing_requires_session() {
    let app = gated_app!();

    let req = TestRequest::get().uri("/api/leads").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("Unauthorized"));
}

#[tokio::test]
async fn test_lead_submission_is_public() {
    let app = gated_app!();

    let req = TestRequest::post().uri("/api/leads").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tracking_and_health_are_public() {
    let app = gated_app!();

    let req = TestRequest::post().uri("/api/tracking/pageview").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_route_is_not_gated() {
    let app = gated_app!();

    let req = TestRequest::post().uri("/api/admin/login").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bearer_token_passes_and_claims_reach_handler() {
    let app = gated_app!();
    let token = get_jwt_service()
        .generate_session_token(42, "ADMIN")
        .unwrap();

    let req = TestRequest::get()
        .uri("/api/admin/verify")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["sub"], "42");
}

#[tokio::test]
async fn test_session_cookie_passes() {
    let app = gated_app!();
    let token = get_jwt_service()
        .generate_session_token(7, "ADMIN")
        .unwrap();

    let req = TestRequest::get()
        .uri("/api/leads")
        .cookie(actix_web::cookie::Cookie::new(ADMIN_COOKIE_NAME, token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = gated_app!();

    let req = TestRequest::get()
        .uri("/api/leads")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_unauthenticated_browser_gets_redirect() {
    let app = gated_app!();

    let req = TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header((header::ACCEPT, "text/html,application/xhtml+xml"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap();
    assert_eq!(location, "/admin/login?from=/api/admin/dashboard");

    // Stale cookie is cleared on the way out
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == ADMIN_COOKIE_NAME)
        .expect("expired cookie present");
    assert!(cookie.value().is_empty());
}

#[tokio::test]
async fn test_options_preflight_passes_without_token() {
    let app = gated_app!();

    let req = TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/leads")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );
}
