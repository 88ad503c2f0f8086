//! Lead submission validation
//!
//! Turns a raw form payload into a normalized payload or a full list of
//! field-level errors. Visitor-facing messages are Bengali, matching the
//! landing page copy. This layer never panics and never short-circuits on
//! the first failure.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::storage::models::{LeadRole, OrganizationSize, TS_EXPORT_PATH};

/// Hard cap applied to every raw string before any other check
const MAX_RAW_LEN: usize = 5000;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 150;
pub const ORGANIZATION_MAX: usize = 200;
pub const MESSAGE_MAX: usize = 500;

/// Raw lead submission as received from the form
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LeadSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "company")]
    pub organization: Option<String>,
    #[serde(rename = "organizationSize")]
    pub organization_size: Option<String>,
    pub message: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(rename = "landingPage")]
    pub landing_page: Option<String>,
    #[serde(rename = "screenSize")]
    pub screen_size: Option<String>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Normalized output of a successful validation
#[derive(Debug, Clone)]
pub struct ValidatedLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: LeadRole,
    pub organization: Option<String>,
    pub organization_size: Option<OrganizationSize>,
    pub message: Option<String>,
}

/// Trim, strip angle brackets and cap length
///
/// Defensive normalization so oversized or HTML-bearing input never reaches
/// storage.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_RAW_LEN)
        .collect()
}

/// `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Bangladeshi mobile number: 11 digits, optionally prefixed `+88` or `01`
///
/// Whitespace is stripped before matching.
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    let all_digits = |s: &str| s.len() == 11 && s.bytes().all(|b| b.is_ascii_digit());

    if all_digits(&cleaned) {
        return true;
    }
    if let Some(rest) = cleaned.strip_prefix("+88") {
        return all_digits(rest);
    }
    if let Some(rest) = cleaned.strip_prefix("01") {
        return all_digits(rest);
    }
    false
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(sanitize_input)
        .filter(|s| !s.is_empty())
}

/// Validate a raw submission, collecting every field error
pub fn validate_lead(raw: &LeadSubmission) -> Result<ValidatedLead, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = non_empty(&raw.name).unwrap_or_default();
    if name.chars().count() < NAME_MIN {
        errors.push(FieldError::new("name", "নাম কমপক্ষে ২ অক্ষরের হতে হবে"));
    } else if name.chars().count() > NAME_MAX {
        errors.push(FieldError::new("name", "নাম ১০০ অক্ষরের মধ্যে হতে হবে"));
    }

    let email = non_empty(&raw.email);
    if let Some(ref email) = email {
        if email.chars().count() > EMAIL_MAX {
            errors.push(FieldError::new("email", "ইমেইল ১৫০ অক্ষরের মধ্যে হতে হবে"));
        } else if !is_valid_email(email) {
            errors.push(FieldError::new("email", "সঠিক ইমেইল ঠিকানা দিন"));
        }
    }

    let phone = non_empty(&raw.phone)
        .map(|p| p.chars().filter(|c| !c.is_whitespace()).collect::<String>());
    if let Some(ref phone) = phone
        && !is_valid_phone(phone)
    {
        errors.push(FieldError::new("phone", "সঠিক মোবাইল নম্বর দিন"));
    }

    // Cross-field rule: at least one contact channel must be present
    if email.is_none() && phone.is_none() {
        let msg = "ইমেইল বা ফোন নম্বরের মধ্যে অন্তত একটি দিন";
        errors.push(FieldError::new("email", msg));
        errors.push(FieldError::new("phone", msg));
    }

    let role = match non_empty(&raw.role) {
        Some(value) => match LeadRole::from_str(&value) {
            Ok(role) => Some(role),
            Err(_) => {
                errors.push(FieldError::new("role", "সঠিক পেশা নির্বাচন করুন"));
                None
            }
        },
        None => {
            errors.push(FieldError::new("role", "পেশা নির্বাচন করুন"));
            None
        }
    };

    let organization = non_empty(&raw.organization);
    if let Some(ref org) = organization
        && org.chars().count() > ORGANIZATION_MAX
    {
        errors.push(FieldError::new(
            "organization",
            "প্রতিষ্ঠানের নাম ২০০ অক্ষরের মধ্যে হতে হবে",
        ));
    }

    let organization_size = match non_empty(&raw.organization_size) {
        Some(value) => match OrganizationSize::from_str(&value) {
            Ok(size) => Some(size),
            Err(_) => {
                errors.push(FieldError::new(
                    "organizationSize",
                    "সঠিক প্রতিষ্ঠানের আকার নির্বাচন করুন",
                ));
                None
            }
        },
        None => None,
    };

    let message = non_empty(&raw.message);
    if let Some(ref message) = message
        && message.chars().count() > MESSAGE_MAX
    {
        errors.push(FieldError::new(
            "message",
            "বার্তা ৫০০ অক্ষরের মধ্যে হতে হবে",
        ));
    }

    match role {
        Some(role) if errors.is_empty() => Ok(ValidatedLead {
            name,
            email,
            phone,
            role,
            organization,
            organization_size,
            message,
        }),
        // A missing role always pushed an error above
        _ => Err(errors),
    }
}
