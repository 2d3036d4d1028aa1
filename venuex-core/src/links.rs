//! Validation for booking and detail URLs before they reach the browser.
//!
//! Venue URLs come straight from third-party listings, so only absolute
//! `http`/`https` URLs with a host are accepted.

use reqwest::Url;
use tracing::{info, warn};

use crate::error::{VenuexError, VenuexResult};

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeLink(Url);

impl SafeLink {
    pub fn parse(raw: &str) -> VenuexResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(unsafe_link(raw, "link is empty"));
        }

        let url = Url::parse(trimmed).map_err(|e| unsafe_link(raw, &e.to_string()))?;

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(unsafe_link(
                raw,
                &format!("scheme '{}' is not allowed", url.scheme()),
            ));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(unsafe_link(raw, "link has no host"));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// Opens the link in the system browser.
    pub fn open(&self) -> VenuexResult<()> {
        info!("Opening {}", self.as_str());
        open::that(self.as_str()).map_err(|e| VenuexError::LinkOpenFailed {
            url: self.as_str().to_string(),
            message: e.to_string(),
        })
    }
}

impl std::fmt::Display for SafeLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn unsafe_link(raw: &str, reason: &str) -> VenuexError {
    VenuexError::UnsafeLink {
        url: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Validates `raw` and opens it; rejected links are logged and never opened.
pub fn open_link(raw: &str) -> VenuexResult<SafeLink> {
    let link = SafeLink::parse(raw).inspect_err(|e| warn!("{}", e))?;
    link.open()?;
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        let link = SafeLink::parse("https://playo.co/booking?venueId=123").unwrap();
        assert_eq!(link.host(), "playo.co");

        let link = SafeLink::parse("  http://localhost:8000/venue/7 ").unwrap();
        assert_eq!(link.as_str(), "http://localhost:8000/venue/7");
    }

    #[test]
    fn test_rejects_other_schemes() {
        for raw in [
            "javascript:alert(1)",
            "file:///etc/passwd",
            "data:text/html,<script>alert(1)</script>",
            "ftp://files.example.com/venue",
        ] {
            let err = SafeLink::parse(raw).unwrap_err();
            assert!(
                matches!(err, VenuexError::UnsafeLink { .. }),
                "expected {raw} to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_relative_and_empty() {
        assert!(SafeLink::parse("").is_err());
        assert!(SafeLink::parse("   ").is_err());
        assert!(SafeLink::parse("/booking/123").is_err());
        assert!(SafeLink::parse("playo.co/booking").is_err());
    }

    #[test]
    fn test_open_link_refuses_unsafe_without_opening() {
        let err = open_link("javascript:void(0)").unwrap_err();
        assert_eq!(err.error_code(), "E6001");
    }
}
