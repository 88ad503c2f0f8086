//! Admin authentication tests
//!
//! Login endpoint behavior: unknown account vs bad password vs success,
//! legacy plaintext password support and session cookie issuance.

use std::sync::Once;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use clinilead::api::constants::ADMIN_COOKIE_NAME;
use clinilead::api::jwt::get_jwt_service;
use clinilead::api::services::admin::admin_routes;
use clinilead::config::init_config;
use clinilead::services::AuthService;
use clinilead::storage::backend::SeaOrmStorage;
use clinilead::utils::password::hash_password;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_storage() -> (std::sync::Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("auth_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = std::sync::Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    (storage, temp_dir)
}

macro_rules! auth_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AuthService::new($storage.clone())))
                .service(web::scope("/api/admin").service(admin_routes())),
        )
        .await
    };
}

#[tokio::test]
async fn test_login_unknown_account_is_404() {
    let (storage, _dir) = create_storage().await;
    let app = auth_app!(storage);

    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "nobody@email.com", "password": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Admin account not found");
}

#[tokio::test]
async fn test_login_wrong_password_is_401_not_404() {
    let (storage, _dir) = create_storage().await;
    let hashed = hash_password("correct-password").unwrap();
    storage
        .upsert_admin("admin@email.com", "Admin", &hashed)
        .await
        .unwrap();

    let app = auth_app!(storage);
    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@email.com", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_success_sets_cookie_and_returns_token() {
    let (storage, _dir) = create_storage().await;
    let hashed = hash_password("admin").unwrap();
    storage
        .upsert_admin("admin@email.com", "Admin", &hashed)
        .await
        .unwrap();

    let app = auth_app!(storage);
    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@email.com", "password": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == ADMIN_COOKIE_NAME)
        .expect("session cookie set");
    assert!(!cookie.value().is_empty());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "admin@email.com");
    assert_eq!(body["user"]["role"], "ADMIN");
    assert!(body["user"].get("password").is_none());

    // Issued token round-trips through the JWT service
    let token = body["token"].as_str().unwrap();
    let claims = get_jwt_service()
        .validate_session_token(token)
        .expect("token valid");
    assert_eq!(claims.role, "ADMIN");
}

#[tokio::test]
async fn test_login_accepts_legacy_plaintext_password() {
    let (storage, _dir) = create_storage().await;
    // Rows migrated from the old system stored the password verbatim
    storage
        .upsert_admin("admin@email.com", "Admin", "admin")
        .await
        .unwrap();

    let app = auth_app!(storage);
    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@email.com", "password": "admin" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let (storage, _dir) = create_storage().await;
    let hashed = hash_password("admin").unwrap();
    storage
        .upsert_admin("admin@email.com", "Admin", &hashed)
        .await
        .unwrap();

    let app = auth_app!(storage);
    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "Admin@Email.com", "password": "admin" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_login_missing_fields_is_400() {
    let (storage, _dir) = create_storage().await;
    let app = auth_app!(storage);

    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "", "password": "" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (storage, _dir) = create_storage().await;
    let app = auth_app!(storage);

    let req = TestRequest::post().uri("/api/admin/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == ADMIN_COOKIE_NAME)
        .expect("expired cookie present");
    assert!(cookie.value().is_empty());
}
