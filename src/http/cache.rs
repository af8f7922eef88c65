//! Conditional requests and cache policy headers
//!
//! The conditional contract is string equality on the HTTP-date: the
//! client's `If-Modified-Since` is compared byte-for-byte against the
//! `Last-Modified` value this server computed, not as a point in time. A
//! client date in any other legal representation yields a full re-fetch.

use std::time::SystemTime;

use chrono::{DateTime, Duration, Utc};

use crate::config::CacheConfig;

/// RFC 7231 IMF-fixdate layout, always GMT, second precision
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP-date
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Whether the conditional header short-circuits the response to 304
pub fn is_not_modified(if_modified_since: Option<&str>, last_modified: &str) -> bool {
    if_modified_since.is_some_and(|client_date| client_date == last_modified)
}

/// `Expires` and `Cache-Control` values for long-lived content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub expires: String,
    pub cache_control: String,
}

/// Compute the cache policy headers for a file extension
///
/// Extensions in the configured long-lived set get `Expires: now + max_age`
/// and `Cache-Control: max-age=<max_age>` on every response for the file,
/// the 304 branch included; everything else gets neither header.
pub fn policy_for(extension: Option<&str>, config: &CacheConfig) -> Option<CachePolicy> {
    let ext = extension?;
    if !config
        .extensions
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    {
        return None;
    }

    let expires_at = Utc::now() + Duration::seconds(i64::from(config.max_age));
    Some(CachePolicy {
        expires: expires_at.format(HTTP_DATE_FORMAT).to_string(),
        cache_control: format!("max-age={}", config.max_age),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration as StdDuration, UNIX_EPOCH};

    fn cache_config() -> CacheConfig {
        CacheConfig {
            max_age: 86400,
            extensions: vec![
                "gif".to_string(),
                "png".to_string(),
                "jpg".to_string(),
                "css".to_string(),
                "js".to_string(),
            ],
        }
    }

    #[test]
    fn test_http_date_format() {
        assert_eq!(http_date(UNIX_EPOCH), "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(
            http_date(UNIX_EPOCH + StdDuration::from_secs(1_000_000_000)),
            "Sun, 09 Sep 2001 01:46:40 GMT"
        );
    }

    #[test]
    fn test_exact_match_is_not_modified() {
        let last_modified = http_date(UNIX_EPOCH);
        assert!(is_not_modified(Some(&last_modified), &last_modified));
    }

    #[test]
    fn test_equivalent_date_in_other_form_misses() {
        // Same instant, different representation: a full re-fetch by contract
        assert!(!is_not_modified(
            Some("Thursday, 01-Jan-70 00:00:00 GMT"),
            "Thu, 01 Jan 1970 00:00:00 GMT"
        ));
        assert!(!is_not_modified(None, "Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_policy_applies_to_long_lived_extensions() {
        let config = cache_config();
        let policy = policy_for(Some("css"), &config).expect("css is long-lived");
        assert_eq!(policy.cache_control, "max-age=86400");
        assert!(policy.expires.ends_with("GMT"));
    }

    #[test]
    fn test_policy_skips_other_extensions() {
        let config = cache_config();
        assert!(policy_for(Some("html"), &config).is_none());
        assert!(policy_for(Some("mp4"), &config).is_none());
        assert!(policy_for(None, &config).is_none());
    }

    #[test]
    fn test_policy_is_case_insensitive() {
        let config = cache_config();
        assert!(policy_for(Some("PNG"), &config).is_some());
    }
}
