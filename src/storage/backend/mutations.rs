//! Write database operations

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, SqlErr};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_lead, new_lead_to_active_model};
use crate::errors::{ClinileadError, Result};
use crate::storage::models::{Lead, LeadStatus, NewLead, NewPageVisit};

use migration::entities::{event, lead, page_visit, user};

impl SeaOrmStorage {
    /// Insert a new lead, mapping unique-constraint violations to Duplicate
    ///
    /// The duplicate-check-then-insert sequence is not transactional; a
    /// concurrent submission racing on the phone unique key lands here.
    pub async fn insert_lead(&self, new: &NewLead) -> Result<Lead> {
        let active = new_lead_to_active_model(new);

        let model = active.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                ClinileadError::duplicate("lead with this phone or email already exists")
            } else {
                ClinileadError::database_operation(format!("Lead insert failed: {}", e))
            }
        })?;

        self.invalidate_count_cache();
        info!("New lead created: id={}, role={:?}", model.id, model.role);
        Ok(model_to_lead(model))
    }

    /// Admin status mutation; touches updated_at
    pub async fn update_lead_status(&self, id: i64, status: LeadStatus) -> Result<Lead> {
        let Some(model) = lead::Entity::find_by_id(id).one(&self.db).await.map_err(|e| {
            ClinileadError::database_operation(format!("Lead lookup failed: {}", e))
        })?
        else {
            return Err(ClinileadError::not_found(format!("Lead not found: {}", id)));
        };

        let mut active: lead::ActiveModel = model.into();
        active.status = Set(status.as_ref().to_string());
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(|e| {
            ClinileadError::database_operation(format!("Lead status update failed: {}", e))
        })?;

        self.invalidate_count_cache();
        info!("Lead {} status set to {}", id, status.as_ref());
        Ok(model_to_lead(updated))
    }

    pub async fn insert_page_visit(&self, visit: &NewPageVisit) -> Result<()> {
        let active = page_visit::ActiveModel {
            id: NotSet,
            session_id: Set(visit.session_id.clone()),
            page: Set(visit.page.clone()),
            referrer: Set(visit.referrer.clone()),
            user_agent: Set(visit.user_agent.clone()),
            device_type: Set(visit.device_type.clone()),
            browser: Set(visit.browser.clone()),
            os: Set(visit.os.clone()),
            screen_size: Set(visit.screen_size.clone()),
            country: Set(visit.country.clone()),
            city: Set(visit.city.clone()),
            visited_at: Set(Utc::now()),
        };

        active.insert(&self.db).await.map_err(|e| {
            ClinileadError::database_operation(format!("Page visit insert failed: {}", e))
        })?;

        Ok(())
    }

    pub async fn insert_event(
        &self,
        event_type: &str,
        page: &str,
        session_id: &str,
        referrer: Option<String>,
        device_type: Option<String>,
        browser: Option<String>,
    ) -> Result<()> {
        let active = event::ActiveModel {
            id: NotSet,
            event_type: Set(event_type.to_string()),
            page: Set(page.to_string()),
            session_id: Set(session_id.to_string()),
            referrer: Set(referrer),
            device_type: Set(device_type),
            browser: Set(browser),
            created_at: Set(Utc::now()),
        };

        active.insert(&self.db).await.map_err(|e| {
            ClinileadError::database_operation(format!("Event insert failed: {}", e))
        })?;

        Ok(())
    }

    /// Create or update the admin account (seed path, never exposed over HTTP)
    pub async fn upsert_admin(&self, email: &str, name: &str, password: &str) -> Result<()> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| {
                ClinileadError::database_operation(format!("Admin lookup failed: {}", e))
            })?;

        match existing {
            Some(model) => {
                let mut active: user::ActiveModel = model.into();
                active.name = Set(name.to_string());
                active.password = Set(password.to_string());
                active.role = Set("ADMIN".to_string());
                active.update(&self.db).await.map_err(|e| {
                    ClinileadError::database_operation(format!("Admin update failed: {}", e))
                })?;
            }
            None => {
                let active = user::ActiveModel {
                    id: NotSet,
                    email: Set(email.to_string()),
                    name: Set(name.to_string()),
                    password: Set(password.to_string()),
                    role: Set("ADMIN".to_string()),
                    created_at: Set(Utc::now()),
                };
                active.insert(&self.db).await.map_err(|e| {
                    ClinileadError::database_operation(format!("Admin insert failed: {}", e))
                })?;
            }
        }

        info!("Admin account ready: {}", email);
        Ok(())
    }
}
