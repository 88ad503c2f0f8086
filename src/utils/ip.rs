//! Client IP extraction
//!
//! The captured address is attribution metadata only; it is never used for
//! any security decision, so no trusted-proxy validation happens here.

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// Loopback placeholder when no address can be determined
pub const FALLBACK_IP: &str = "127.0.0.1";

/// Extract the forwarded client IP from headers
///
/// Prefers the first entry of `X-Forwarded-For`, then `X-Real-IP`.
pub fn extract_forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}

/// Best-effort client IP: forwarded header, then peer address, then loopback
pub fn client_ip(req: &HttpRequest) -> String {
    extract_forwarded_ip(req.headers())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| FALLBACK_IP.to_string())
}
