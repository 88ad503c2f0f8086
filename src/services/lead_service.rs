//! Lead intake and retrieval
//!
//! Orchestrates validation, attribution merge, duplicate detection and
//! persistence. Duplicate detection is a pre-check; the unique phone
//! constraint backstops the race between concurrent submissions.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{ClinileadError, Result};
use crate::services::attribution::RequestAttribution;
use crate::services::validation::{self, FieldError, LeadSubmission, ValidatedLead};
use crate::storage::backend::LeadFilter;
use crate::storage::models::{Lead, LeadStatus, NewLead};
use crate::storage::SeaOrmStorage;

/// Result of a submission attempt
///
/// Duplicates are an expected outcome, not an error; the caller decides
/// how to phrase them.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Created(Lead),
    Duplicate,
    Invalid(Vec<FieldError>),
}

#[derive(Clone)]
pub struct LeadService {
    storage: Arc<SeaOrmStorage>,
}

impl LeadService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Validate, dedup and persist one submission
    pub async fn submit(
        &self,
        raw: &LeadSubmission,
        attribution: &RequestAttribution,
    ) -> Result<SubmissionOutcome> {
        let validated = match validation::validate_lead(raw) {
            Ok(validated) => validated,
            Err(errors) => {
                debug!(error_count = errors.len(), "Lead submission failed validation");
                return Ok(SubmissionOutcome::Invalid(errors));
            }
        };

        if self.is_duplicate(&validated).await? {
            info!("Duplicate lead submission rejected");
            return Ok(SubmissionOutcome::Duplicate);
        }

        let new_lead = build_new_lead(validated, raw, attribution);
        match self.storage.insert_lead(&new_lead).await {
            Ok(lead) => {
                info!(lead_id = lead.id, role = ?lead.role, "Lead captured");
                Ok(SubmissionOutcome::Created(lead))
            }
            // Concurrent submit slipped past the pre-check and hit the
            // unique phone constraint
            Err(e) if matches!(e, ClinileadError::Duplicate(_)) => {
                warn!("Duplicate lead caught by unique constraint");
                Ok(SubmissionOutcome::Duplicate)
            }
            Err(e) => Err(e),
        }
    }

    /// Email takes precedence when both channels are present
    async fn is_duplicate(&self, validated: &ValidatedLead) -> Result<bool> {
        if let Some(ref email) = validated.email
            && self.storage.find_lead_by_email(email).await?.is_some()
        {
            return Ok(true);
        }
        if let Some(ref phone) = validated.phone
            && self.storage.find_lead_by_phone(phone).await?.is_some()
        {
            return Ok(true);
        }
        Ok(false)
    }

    /// Newest-first page of leads, optionally filtered by status
    pub async fn list(
        &self,
        page: u64,
        page_size: u64,
        status: Option<LeadStatus>,
    ) -> Result<(Vec<Lead>, u64)> {
        self.storage
            .list_leads(page, page_size, LeadFilter { status })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Lead> {
        self.storage
            .find_lead_by_id(id)
            .await?
            .ok_or_else(|| ClinileadError::not_found(format!("Lead not found: {}", id)))
    }

    pub async fn update_status(&self, id: i64, status: LeadStatus) -> Result<Lead> {
        let lead = self.storage.update_lead_status(id, status).await?;
        info!(lead_id = id, status = status.as_ref(), "Lead status updated");
        Ok(lead)
    }
}

fn build_new_lead(
    validated: ValidatedLead,
    raw: &LeadSubmission,
    attribution: &RequestAttribution,
) -> NewLead {
    let clean = |v: &Option<String>| {
        v.as_deref()
            .map(validation::sanitize_input)
            .filter(|s| !s.is_empty())
    };

    NewLead {
        name: validated.name,
        email: validated.email,
        phone: validated.phone,
        role: validated.role,
        organization: validated.organization,
        organization_size: validated.organization_size,
        message: validated.message,
        utm_source: clean(&raw.utm_source),
        utm_medium: clean(&raw.utm_medium),
        utm_campaign: clean(&raw.utm_campaign),
        session_id: clean(&raw.session_id),
        landing_page: clean(&raw.landing_page),
        screen_size: clean(&raw.screen_size),
        ip_address: Some(attribution.ip_address.clone()),
        user_agent: attribution.user_agent.clone(),
        referrer: attribution.referrer.clone(),
        device: attribution.device.clone(),
    }
}
