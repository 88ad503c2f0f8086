//! Lead intake and listing endpoints

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use std::str::FromStr;
use tracing::{error, trace};

use crate::services::validation::LeadSubmission;
use crate::services::{LeadService, SubmissionOutcome, capture_attribution};
use crate::storage::models::LeadStatus;

use super::helpers::{error_from_clinilead, error_response};
use super::types::{
    ApiResponse, GetLeadsQuery, LeadListItem, LeadProjection, PaginatedResponse, PaginationInfo,
    UpdateStatusRequest, ValidationErrorResponse,
};

/// Visitor-facing copy, must stay in sync with the landing page
pub const MSG_SUBMITTED: &str =
    "আপনার আবেদনটি সফলভাবে জমা হয়েছে! শীঘ্রই আমরা আপনার সাথে যোগাযোগ করব।";
pub const MSG_DUPLICATE: &str = "এই ফোন বা ইমেইল দিয়ে ইতিমধ্যে আবেদন করা হয়েছে";
pub const MSG_INVALID_INPUT: &str = "আপনার ইনপুটে সমস্যা আছে";
pub const MSG_SERVER_ERROR: &str = "সার্ভারে সমস্যা হয়েছে, পরে আবার চেষ্টা করুন";

/// POST /api/leads (public, form-encoded)
pub async fn submit_lead(
    req: HttpRequest,
    form: web::Form<LeadSubmission>,
    lead_service: web::Data<LeadService>,
) -> ActixResult<impl Responder> {
    trace!("Lead submission received");
    let attribution = capture_attribution(&req);

    match lead_service.submit(&form, &attribution).await {
        Ok(SubmissionOutcome::Created(lead)) => Ok(HttpResponse::Created()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse {
                success: true,
                data: Some(LeadProjection::from(&lead)),
                message: Some(MSG_SUBMITTED.to_string()),
            })),
        Ok(SubmissionOutcome::Duplicate) => {
            Ok(error_response(StatusCode::BAD_REQUEST, MSG_DUPLICATE))
        }
        Ok(SubmissionOutcome::Invalid(errors)) => Ok(HttpResponse::BadRequest()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ValidationErrorResponse {
                success: false,
                errors,
                message: MSG_INVALID_INPUT.to_string(),
            })),
        Err(e) => {
            error!("Lead submission failed: {}", e);
            Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                MSG_SERVER_ERROR,
            ))
        }
    }
}

/// GET /api/leads (admin)
pub async fn get_leads(
    query: web::Query<GetLeadsQuery>,
    lead_service: web::Data<LeadService>,
) -> ActixResult<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 200);

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => match LeadStatus::from_str(raw) {
            Ok(status) => Some(status),
            Err(_) => {
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Unknown status: {}", raw),
                ));
            }
        },
        None => None,
    };

    match lead_service.list(page, limit, status).await {
        Ok((leads, total)) => {
            trace!(
                "Returning {} leads (page {}, total {})",
                leads.len(),
                page,
                total
            );
            let rows: Vec<LeadListItem> = leads.into_iter().map(LeadListItem::from).collect();
            Ok(HttpResponse::Ok()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(PaginatedResponse {
                    success: true,
                    data: rows,
                    pagination: PaginationInfo::new(page, limit, total),
                }))
        }
        Err(e) => {
            error!("Lead listing failed: {}", e);
            Ok(error_from_clinilead(&e))
        }
    }
}

/// PATCH /api/leads/{id}/status (admin)
pub async fn update_lead_status(
    path: web::Path<i64>,
    body: web::Json<UpdateStatusRequest>,
    lead_service: web::Data<LeadService>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();

    let Ok(status) = LeadStatus::from_str(&body.status) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            &format!("Unknown status: {}", body.status),
        ));
    };

    match lead_service.update_status(id, status).await {
        Ok(lead) => Ok(HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse {
                success: true,
                data: Some(lead),
                message: None,
            })),
        Err(e) => Ok(error_from_clinilead(&e)),
    }
}
