//! Request attribution capture
//!
//! Pulls client IP, referrer and device metadata out of the incoming HTTP
//! request so submissions and page views carry their marketing context.
//! Parsing failures degrade to absent fields, never to request errors.

use actix_web::HttpRequest;
use actix_web::http::header;
use woothee::parser::Parser;

use crate::storage::models::DeviceMetadata;
use crate::utils::ip::client_ip;

/// Attribution snapshot for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestAttribution {
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device: DeviceMetadata,
}

/// Classify a user agent into browser, OS and a coarse device type
///
/// Woothee categories map as: smartphone/mobilephone become `mobile`,
/// crawlers are labelled as such, everything else is `desktop`.
pub fn parse_device_metadata(user_agent: Option<&str>) -> DeviceMetadata {
    let Some(ua) = user_agent.filter(|s| !s.is_empty()) else {
        return DeviceMetadata::default();
    };

    let parser = Parser::new();
    let Some(result) = parser.parse(ua) else {
        return DeviceMetadata::default();
    };

    let device_type = match result.category {
        "smartphone" | "mobilephone" => Some("mobile".to_string()),
        "crawler" => Some("crawler".to_string()),
        "UNKNOWN" => None,
        _ => Some("desktop".to_string()),
    };
    let browser = (result.name != "UNKNOWN").then(|| result.name.to_string());
    let os = (result.os != "UNKNOWN").then(|| result.os.to_string());

    DeviceMetadata {
        device_type,
        browser,
        os,
        screen: None,
    }
}

fn header_value(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Capture attribution from request headers and the connection peer
pub fn capture_attribution(req: &HttpRequest) -> RequestAttribution {
    let user_agent = header_value(req, header::USER_AGENT);
    let referrer = header_value(req, header::REFERER);
    let device = parse_device_metadata(user_agent.as_deref());

    RequestAttribution {
        ip_address: client_ip(req),
        user_agent,
        referrer,
        device,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_desktop_browser_classified() {
        let meta = parse_device_metadata(Some(CHROME_DESKTOP));
        assert_eq!(meta.device_type.as_deref(), Some("desktop"));
        assert_eq!(meta.browser.as_deref(), Some("Chrome"));
        assert_eq!(meta.os.as_deref(), Some("Windows 10"));
    }

    #[test]
    fn test_iphone_classified_as_mobile() {
        let meta = parse_device_metadata(Some(SAFARI_IPHONE));
        assert_eq!(meta.device_type.as_deref(), Some("mobile"));
        assert_eq!(meta.browser.as_deref(), Some("Safari"));
    }

    #[test]
    fn test_missing_or_garbage_ua_degrades_to_empty() {
        assert_eq!(parse_device_metadata(None), DeviceMetadata::default());
        assert_eq!(parse_device_metadata(Some("")), DeviceMetadata::default());
    }

    #[test]
    fn test_capture_reads_headers() {
        let req = TestRequest::default()
            .insert_header((header::USER_AGENT, CHROME_DESKTOP))
            .insert_header((header::REFERER, "https://google.com/search"))
            .insert_header(("x-forwarded-for", "203.0.113.9, 10.0.0.1"))
            .to_http_request();

        let attribution = capture_attribution(&req);
        assert_eq!(attribution.ip_address, "203.0.113.9");
        assert_eq!(
            attribution.referrer.as_deref(),
            Some("https://google.com/search")
        );
        assert_eq!(attribution.device.browser.as_deref(), Some("Chrome"));
    }
}
