//! Page view tracking
//!
//! Writes a page visit row plus a PAGE_VIEW event per beacon. Sessions are
//! client-supplied; a missing session id gets a fresh UUID so later beacons
//! from the same tab can correlate.

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::services::attribution::RequestAttribution;
use crate::services::validation::sanitize_input;
use crate::storage::models::NewPageVisit;
use crate::storage::SeaOrmStorage;

pub const PAGE_VIEW_EVENT: &str = "PAGE_VIEW";

/// Raw tracking beacon fields after deserialization
#[derive(Debug, Clone, Default)]
pub struct PageViewBeacon {
    pub page: Option<String>,
    pub session_id: Option<String>,
    pub referrer: Option<String>,
    pub screen_size: Option<String>,
}

#[derive(Clone)]
pub struct TrackingService {
    storage: Arc<SeaOrmStorage>,
}

impl TrackingService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Record one page view, returning the session id in effect
    pub async fn record_page_view(
        &self,
        beacon: &PageViewBeacon,
        attribution: &RequestAttribution,
    ) -> Result<String> {
        let session_id = beacon
            .session_id
            .as_deref()
            .map(sanitize_input)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let page = beacon
            .page
            .as_deref()
            .map(sanitize_input)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "/".to_string());

        // Header referrer wins over the client-reported one
        let referrer = attribution
            .referrer
            .clone()
            .or_else(|| beacon.referrer.as_deref().map(sanitize_input))
            .filter(|s| !s.is_empty());

        let visit = NewPageVisit {
            session_id: session_id.clone(),
            page: page.clone(),
            referrer: referrer.clone(),
            user_agent: attribution.user_agent.clone(),
            device_type: attribution.device.device_type.clone(),
            browser: attribution.device.browser.clone(),
            os: attribution.device.os.clone(),
            screen_size: beacon
                .screen_size
                .as_deref()
                .map(sanitize_input)
                .filter(|s| !s.is_empty()),
            country: None,
            city: None,
        };

        self.storage.insert_page_visit(&visit).await?;
        self.storage
            .insert_event(
                PAGE_VIEW_EVENT,
                &page,
                &session_id,
                referrer,
                attribution.device.device_type.clone(),
                attribution.device.browser.clone(),
            )
            .await?;

        debug!(session_id = %session_id, page = %page, "Page view recorded");
        Ok(session_id)
    }
}
