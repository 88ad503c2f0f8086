//! Conversions between SeaORM entity models and domain types

use std::str::FromStr;

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{AdminUser, Lead, LeadRole, LeadStatus, NewLead, OrganizationSize};
use migration::entities::{lead, user};

pub fn model_to_lead(model: lead::Model) -> Lead {
    Lead {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        role: model.role.as_deref().and_then(|r| LeadRole::from_str(r).ok()),
        organization: model.organization,
        organization_size: model
            .organization_size
            .as_deref()
            .and_then(|s| OrganizationSize::from_str(s).ok()),
        message: model.message,
        status: LeadStatus::from_str(&model.status).unwrap_or_default(),
        utm_source: model.utm_source,
        utm_medium: model.utm_medium,
        utm_campaign: model.utm_campaign,
        session_id: model.session_id,
        landing_page: model.landing_page,
        screen_size: model.screen_size,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        referrer: model.referrer,
        device_type: model.device_type,
        browser: model.browser,
        os: model.os,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn new_lead_to_active_model(new: &NewLead) -> lead::ActiveModel {
    let now = Utc::now();
    lead::ActiveModel {
        id: NotSet,
        name: Set(new.name.clone()),
        email: Set(new.email.clone()),
        phone: Set(new.phone.clone()),
        role: Set(Some(new.role.as_ref().to_string())),
        organization: Set(new.organization.clone()),
        organization_size: Set(new.organization_size.map(|s| s.as_ref().to_string())),
        message: Set(new.message.clone()),
        status: Set(LeadStatus::default().as_ref().to_string()),
        utm_source: Set(new.utm_source.clone()),
        utm_medium: Set(new.utm_medium.clone()),
        utm_campaign: Set(new.utm_campaign.clone()),
        session_id: Set(new.session_id.clone()),
        landing_page: Set(new.landing_page.clone()),
        screen_size: Set(new.screen_size.clone()),
        ip_address: Set(new.ip_address.clone()),
        user_agent: Set(new.user_agent.clone()),
        referrer: Set(new.referrer.clone()),
        device_type: Set(new.device.device_type.clone()),
        browser: Set(new.device.browser.clone()),
        os: Set(new.device.os.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub fn model_to_admin_user(model: user::Model) -> AdminUser {
    AdminUser {
        id: model.id,
        email: model.email,
        name: model.name,
        password: model.password,
        role: model.role,
        created_at: model.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::DeviceMetadata;

    fn sample_new_lead() -> NewLead {
        NewLead {
            name: "Dr. Rahman".to_string(),
            email: Some("rahman@example.com".to_string()),
            phone: Some("01712345678".to_string()),
            role: LeadRole::Doctor,
            organization: None,
            organization_size: Some(OrganizationSize::Small2To10),
            message: None,
            utm_source: Some("google".to_string()),
            utm_medium: None,
            utm_campaign: None,
            session_id: Some("sess-1".to_string()),
            landing_page: Some("/".to_string()),
            screen_size: Some("1920x1080".to_string()),
            ip_address: Some("127.0.0.1".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            referrer: None,
            device: DeviceMetadata {
                device_type: Some("desktop".to_string()),
                browser: Some("Chrome".to_string()),
                os: Some("Windows 10".to_string()),
                screen: Some("1920x1080".to_string()),
            },
        }
    }

    #[test]
    fn test_new_lead_to_active_model_defaults_status_new() {
        let model = new_lead_to_active_model(&sample_new_lead());
        assert_eq!(model.status.clone().unwrap(), "NEW");
        assert_eq!(model.role.clone().unwrap(), Some("DOCTOR".to_string()));
    }

    #[test]
    fn test_model_round_trip() {
        let active = new_lead_to_active_model(&sample_new_lead());
        let model = lead::Model {
            id: 1,
            name: active.name.clone().unwrap(),
            email: active.email.clone().unwrap(),
            phone: active.phone.clone().unwrap(),
            role: active.role.clone().unwrap(),
            organization: None,
            organization_size: active.organization_size.clone().unwrap(),
            message: None,
            status: active.status.clone().unwrap(),
            utm_source: active.utm_source.clone().unwrap(),
            utm_medium: None,
            utm_campaign: None,
            session_id: active.session_id.clone().unwrap(),
            landing_page: active.landing_page.clone().unwrap(),
            screen_size: active.screen_size.clone().unwrap(),
            ip_address: active.ip_address.clone().unwrap(),
            user_agent: active.user_agent.clone().unwrap(),
            referrer: None,
            device_type: active.device_type.clone().unwrap(),
            browser: active.browser.clone().unwrap(),
            os: active.os.clone().unwrap(),
            created_at: active.created_at.clone().unwrap(),
            updated_at: active.updated_at.clone().unwrap(),
        };

        let lead = model_to_lead(model);
        assert_eq!(lead.role, Some(LeadRole::Doctor));
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.organization_size, Some(OrganizationSize::Small2To10));
    }

    #[test]
    fn test_unparseable_role_becomes_none() {
        let mut active = new_lead_to_active_model(&sample_new_lead());
        active.role = Set(Some("LEGACY_VALUE".to_string()));
        let model = lead::Model {
            id: 2,
            name: "x".to_string(),
            email: None,
            phone: Some("01712345679".to_string()),
            role: Some("LEGACY_VALUE".to_string()),
            organization: None,
            organization_size: None,
            message: None,
            status: "NEW".to_string(),
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
            session_id: None,
            landing_page: None,
            screen_size: None,
            ip_address: None,
            user_agent: None,
            referrer: None,
            device_type: None,
            browser: None,
            os: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(model_to_lead(model).role, None);
    }
}
