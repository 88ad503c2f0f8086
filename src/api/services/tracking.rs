//! Page view tracking endpoint
//!
//! Fire-and-forget beacon from the landing page. A failed write reports a
//! generic 500; the session id is echoed either way so the client keeps a
//! stable session.

use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{trace, warn};

use crate::services::tracking_service::PageViewBeacon;
use crate::services::{TrackingService, capture_attribution};

use super::types::{PageViewRequest, PageViewResponse};

/// POST /api/tracking/pageview (public)
pub async fn record_page_view(
    req: HttpRequest,
    body: web::Json<PageViewRequest>,
    tracking_service: web::Data<TrackingService>,
) -> ActixResult<impl Responder> {
    trace!("Page view beacon received");
    let attribution = capture_attribution(&req);

    let beacon = PageViewBeacon {
        page: body.page.clone(),
        session_id: body.session_id.clone(),
        referrer: body.referrer.clone(),
        screen_size: body.screen_size.clone(),
    };

    match tracking_service.record_page_view(&beacon, &attribution).await {
        Ok(session_id) => Ok(HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(PageViewResponse {
                success: true,
                session_id,
                message: None,
            })),
        Err(e) => {
            warn!("Page view write failed: {}", e);
            let session_id = body
                .session_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            Ok(HttpResponse::InternalServerError()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(PageViewResponse {
                    success: false,
                    session_id,
                    message: Some("Tracking failed".to_string()),
                }))
        }
    }
}
