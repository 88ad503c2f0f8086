use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

use super::types::{HealthChecks, HealthDatabaseCheck, HealthResponse};

/// Health Service
///
/// Calls storage directly instead of going through the lead service; probes
/// need a fast answer, not business logic.
pub struct HealthService;

impl HealthService {
    pub async fn health_check(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        trace!("Received health check request");

        let database = match tokio::time::timeout(
            Duration::from_secs(5),
            storage.count_all_leads(),
        )
        .await
        {
            Ok(Ok(count)) => {
                trace!("Database health check passed, {} leads found", count);
                HealthDatabaseCheck {
                    status: "healthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    error: None,
                }
            }
            Ok(Err(e)) => {
                error!("Database health check failed: {}", e);
                HealthDatabaseCheck {
                    status: "unhealthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    error: Some(e.to_string()),
                }
            }
            Err(_) => {
                error!("Database health check timed out");
                HealthDatabaseCheck {
                    status: "unhealthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    error: Some("timeout".to_string()),
                }
            }
        };

        let healthy = database.status == "healthy";
        let response = HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            checks: HealthChecks { database },
        };

        if healthy {
            HttpResponse::Ok().json(response)
        } else {
            HttpResponse::ServiceUnavailable().json(response)
        }
    }
}
