//! Admin dashboard aggregates

use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::storage::models::{Lead, TS_EXPORT_PATH};
use crate::storage::SeaOrmStorage;

/// Bucket label for leads persisted before role capture existed
const UNKNOWN_ROLE: &str = "UNKNOWN";

/// Label used when no lead carries a UTM source
const DIRECT_SOURCE: &str = "Direct";

const RECENT_LEADS_LIMIT: u64 = 5;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct RoleCount {
    pub role: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: u64,
    pub role_distribution: Vec<RoleCount>,
    pub top_source: String,
    /// Whole-number percentage of leads from mobile devices
    pub mobile_percentage: u64,
    #[ts(type = "unknown[]")]
    pub recent_leads: Vec<Lead>,
    pub top_role: Option<String>,
}

#[derive(Clone)]
pub struct DashboardService {
    storage: Arc<SeaOrmStorage>,
}

impl DashboardService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let total_leads = self.storage.count_all_leads().await?;

        let role_distribution: Vec<RoleCount> = self
            .storage
            .role_distribution()
            .await?
            .into_iter()
            .map(|row| RoleCount {
                role: row.role.unwrap_or_else(|| UNKNOWN_ROLE.to_string()),
                count: row.count.max(0) as u64,
            })
            .collect();

        let top_role = role_distribution
            .iter()
            .max_by_key(|r| r.count)
            .map(|r| r.role.clone());

        let top_source = self
            .storage
            .top_utm_source()
            .await?
            .unwrap_or_else(|| DIRECT_SOURCE.to_string());

        let mobile_percentage = if total_leads > 0 {
            let mobile = self.storage.mobile_lead_count().await?;
            (mobile as f64 / total_leads as f64 * 100.0).round() as u64
        } else {
            0
        };

        let recent_leads = self.storage.recent_leads(RECENT_LEADS_LIMIT).await?;

        Ok(DashboardStats {
            total_leads,
            role_distribution,
            top_source,
            mobile_percentage,
            recent_leads,
            top_role,
        })
    }
}
