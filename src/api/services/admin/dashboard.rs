//! Admin dashboard endpoint

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::{error, trace};

use crate::services::DashboardService;

use super::super::helpers::error_from_clinilead;

/// GET /api/admin/dashboard
///
/// Responds with the bare stats object, no envelope; the admin panel
/// consumes the fields directly.
pub async fn get_dashboard(
    dashboard_service: web::Data<DashboardService>,
) -> ActixResult<impl Responder> {
    trace!("Dashboard stats requested");

    match dashboard_service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(stats)),
        Err(e) => {
            error!("Dashboard aggregation failed: {}", e);
            Ok(error_from_clinilead(&e))
        }
    }
}
