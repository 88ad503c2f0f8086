//! Page view tracking tests
//!
//! Session id handling plus the page_visit and event rows each beacon
//! produces.

use std::sync::Once;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use sea_orm::EntityTrait;
use serde_json::{Value, json};
use tempfile::TempDir;

use clinilead::api::services::tracking::record_page_view;
use clinilead::config::init_config;
use clinilead::services::TrackingService;
use clinilead::storage::backend::SeaOrmStorage;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_storage() -> (std::sync::Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("tracking_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = std::sync::Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    (storage, temp_dir)
}

macro_rules! tracking_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(TrackingService::new($storage.clone())))
                .route("/api/tracking/pageview", web::post().to(record_page_view)),
        )
        .await
    };
}

#[tokio::test]
async fn test_pageview_generates_session_id_when_absent() {
    let (storage, _dir) = create_storage().await;
    let app = tracking_app!(storage);

    let req = TestRequest::post()
        .uri("/api/tracking/pageview")
        .set_json(json!({ "path": "/pricing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    let session_id = body["sessionId"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(session_id).is_ok());
}

#[tokio::test]
async fn test_pageview_echoes_client_session_id() {
    let (storage, _dir) = create_storage().await;
    let app = tracking_app!(storage);

    let req = TestRequest::post()
        .uri("/api/tracking/pageview")
        .set_json(json!({ "path": "/", "sessionId": "sess-abc-123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["sessionId"], "sess-abc-123");
}

#[tokio::test]
async fn test_pageview_persists_visit_and_event_rows() {
    let (storage, _dir) = create_storage().await;
    let app = tracking_app!(storage);

    let req = TestRequest::post()
        .uri("/api/tracking/pageview")
        .insert_header((
            header::USER_AGENT,
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148",
        ))
        .insert_header((header::REFERER, "https://facebook.com/ad"))
        .set_json(json!({
            "path": "/pricing",
            "sessionId": "sess-persist",
            "screenSize": "390x844"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let visits = migration::entities::page_visit::Entity::find()
        .all(storage.get_db())
        .await
        .unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].session_id, "sess-persist");
    assert_eq!(visits[0].page, "/pricing");
    assert_eq!(visits[0].referrer.as_deref(), Some("https://facebook.com/ad"));
    assert_eq!(visits[0].screen_size.as_deref(), Some("390x844"));
    assert_eq!(visits[0].device_type.as_deref(), Some("mobile"));

    let events = migration::entities::event::Entity::find()
        .all(storage.get_db())
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "PAGE_VIEW");
    assert_eq!(events[0].page, "/pricing");
    assert_eq!(events[0].session_id, "sess-persist");
}

#[tokio::test]
async fn test_pageview_defaults_page_to_root() {
    let (storage, _dir) = create_storage().await;
    let app = tracking_app!(storage);

    let req = TestRequest::post()
        .uri("/api/tracking/pageview")
        .set_json(json!({ "sessionId": "sess-nopage" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let visits = migration::entities::page_visit::Entity::find()
        .all(storage.get_db())
        .await
        .unwrap();
    assert_eq!(visits[0].page, "/");
}

#[tokio::test]
async fn test_pageview_strips_markup_from_session_id() {
    let (storage, _dir) = create_storage().await;
    let app = tracking_app!(storage);

    let req = TestRequest::post()
        .uri("/api/tracking/pageview")
        .set_json(json!({ "path": "/", "sessionId": "<script>alert(1)</script>" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let session_id = body["sessionId"].as_str().unwrap();
    assert!(!session_id.contains('<'));
    assert!(!session_id.contains('>'));
}

#[tokio::test]
async fn test_pageview_write_failure_is_500_with_generic_message() {
    let (storage, _dir) = create_storage().await;
    let app = tracking_app!(storage);

    // Closing the pool makes every subsequent write fail
    storage.get_db().clone().close().await.unwrap();

    let req = TestRequest::post()
        .uri("/api/tracking/pageview")
        .set_json(json!({ "path": "/pricing", "sessionId": "sess-fail" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Tracking failed");
    assert_eq!(body["sessionId"], "sess-fail");
}

#[tokio::test]
async fn test_event_session_id_field_check() {
    let (storage, _dir) = create_storage().await;
    let app = tracking_app!(storage);

    for n in 0..3 {
        let req = TestRequest::post()
            .uri("/api/tracking/pageview")
            .set_json(json!({ "path": "/", "sessionId": format!("sess-{}", n) }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let events = migration::entities::event::Entity::find()
        .all(storage.get_db())
        .await
        .unwrap();
    assert_eq!(events.len(), 3);
}
