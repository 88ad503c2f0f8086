//! API module constants

/// Admin session cookie name
pub const ADMIN_COOKIE_NAME: &str = "admin_token";
