//! Read-only database operations

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::{debug, error};

use super::{LeadFilter, SeaOrmStorage};
use super::converters::{model_to_admin_user, model_to_lead};
use crate::errors::{ClinileadError, Result};
use crate::storage::models::{AdminUser, Lead};

use migration::entities::{lead, user};

/// One row of the role-distribution group-by
#[derive(Debug, FromQueryResult)]
pub struct RoleCountRow {
    pub role: Option<String>,
    pub count: i64,
}

/// One row of the utm_source group-by
#[derive(Debug, FromQueryResult)]
pub struct SourceCountRow {
    pub utm_source: Option<String>,
    pub count: i64,
}

impl SeaOrmStorage {
    pub async fn find_lead_by_email(&self, email: &str) -> Result<Option<Lead>> {
        let model = lead::Entity::find()
            .filter(lead::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Lead lookup by email failed: {}", e))
            })?;

        Ok(model.map(model_to_lead))
    }

    pub async fn find_lead_by_phone(&self, phone: &str) -> Result<Option<Lead>> {
        let model = lead::Entity::find()
            .filter(lead::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Lead lookup by phone failed: {}", e))
            })?;

        Ok(model.map(model_to_lead))
    }

    pub async fn find_lead_by_id(&self, id: i64) -> Result<Option<Lead>> {
        let model = lead::Entity::find_by_id(id).one(&self.db).await.map_err(|e| {
            ClinileadError::database_operation(format!("Lead lookup by id failed: {}", e))
        })?;

        Ok(model.map(model_to_lead))
    }

    /// Paginated lead listing, newest first (id DESC as tiebreak)
    ///
    /// Returns `(leads, total)`. The COUNT result is cached for 30 seconds
    /// per filter; writes invalidate the cache.
    pub async fn list_leads(
        &self,
        page: u64,
        page_size: u64,
        filter: LeadFilter,
    ) -> Result<(Vec<Lead>, u64)> {
        let cache_key = format!("leads:status={:?}", filter.status);

        let mut condition = Condition::all();
        if let Some(status) = filter.status {
            condition = condition.add(lead::Column::Status.eq(status.as_ref()));
        }

        let total = if let Some(cached) = self.count_cache.get(&cache_key) {
            debug!("count cache hit: key={}, value={}", cache_key, cached);
            cached
        } else {
            let count = lead::Entity::find()
                .filter(condition.clone())
                .count(&self.db)
                .await
                .map_err(|e| {
                    ClinileadError::database_operation(format!("Lead count failed: {}", e))
                })?;
            self.count_cache.insert(cache_key, count);
            count
        };

        let page_offset = page.saturating_sub(1);
        let models = lead::Entity::find()
            .filter(condition)
            .order_by_desc(lead::Column::CreatedAt)
            .order_by_desc(lead::Column::Id)
            .paginate(&self.db, page_size)
            .fetch_page(page_offset)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Lead page query failed: {}", e))
            })?;

        Ok((models.into_iter().map(model_to_lead).collect(), total))
    }

    pub async fn count_all_leads(&self) -> Result<u64> {
        lead::Entity::find().count(&self.db).await.map_err(|e| {
            ClinileadError::database_operation(format!("Total lead count failed: {}", e))
        })
    }

    /// Counts per role, including a row with `role = NULL` for legacy leads
    pub async fn role_distribution(&self) -> Result<Vec<RoleCountRow>> {
        lead::Entity::find()
            .select_only()
            .column(lead::Column::Role)
            .column_as(lead::Column::Id.count(), "count")
            .group_by(lead::Column::Role)
            .into_model::<RoleCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Role distribution failed: {}", e))
            })
    }

    /// Most frequent non-null utm_source, if any leads carry one
    pub async fn top_utm_source(&self) -> Result<Option<String>> {
        let row = lead::Entity::find()
            .select_only()
            .column(lead::Column::UtmSource)
            .column_as(lead::Column::Id.count(), "count")
            .filter(lead::Column::UtmSource.is_not_null())
            .group_by(lead::Column::UtmSource)
            .order_by_desc(lead::Column::Id.count())
            .into_model::<SourceCountRow>()
            .one(&self.db)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Top source query failed: {}", e))
            })?;

        Ok(row.and_then(|r| r.utm_source))
    }

    /// Leads whose screen size or user agent carry a mobile indicator
    pub async fn mobile_lead_count(&self) -> Result<u64> {
        let mobile_markers = Condition::any()
            .add(lead::Column::ScreenSize.contains("Mobile"))
            .add(lead::Column::ScreenSize.contains("Android"))
            .add(lead::Column::ScreenSize.contains("iPhone"))
            .add(lead::Column::UserAgent.contains("Mobile"))
            .add(lead::Column::UserAgent.contains("Android"))
            .add(lead::Column::UserAgent.contains("iPhone"));

        lead::Entity::find()
            .filter(mobile_markers)
            .count(&self.db)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Mobile lead count failed: {}", e))
            })
    }

    /// Most recently created leads with the full field set
    pub async fn recent_leads(&self, limit: u64) -> Result<Vec<Lead>> {
        let models = lead::Entity::find()
            .order_by_desc(lead::Column::CreatedAt)
            .order_by_desc(lead::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Recent leads query failed: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_lead).collect())
    }

    /// Admin lookup for the login path (email AND role must match)
    pub async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Role.eq("ADMIN"))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Admin lookup failed: {}", e);
                ClinileadError::database_operation(format!("Admin lookup failed: {}", e))
            })?;

        Ok(model.map(model_to_admin_user))
    }
}
