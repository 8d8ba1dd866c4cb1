//! Rate limit information carried by API response headers.
//!
//! The inbox API reports its budget on every response and a `Retry-After`
//! on 429s:
//! - `x-ratelimit-limit`: requests allowed in the current window
//! - `x-ratelimit-remaining`: requests remaining
//! - `x-ratelimit-reset`: unix timestamp (seconds) when the window resets
//! - `retry-after`: delta-seconds or an HTTP-date

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// Budget reported by the upstream on a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Requests allowed in the current window
    pub limit: Option<u32>,
    /// Requests remaining in the current window
    pub remaining: Option<u32>,
    /// Unix timestamp (seconds) when the window resets
    pub reset_at: Option<i64>,
}

impl RateLimitHeaders {
    /// Read the `x-ratelimit-*` headers. Returns `None` when none are present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let parsed = Self {
            limit: parse_header(headers, "x-ratelimit-limit"),
            remaining: parse_header(headers, "x-ratelimit-remaining"),
            reset_at: parse_header(headers, "x-ratelimit-reset"),
        };
        if parsed.limit.is_none() && parsed.remaining.is_none() && parsed.reset_at.is_none() {
            return None;
        }
        Some(parsed)
    }
}

/// Parse `Retry-After` relative to the current time.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    parse_retry_after_at(headers, Utc::now())
}

/// Parse `Retry-After` relative to `now`.
///
/// Accepts delta-seconds (`"2"`, `"1.5"`) and RFC 2822 HTTP-dates. Dates in
/// the past yield `Duration::ZERO`; delta-seconds too large for a `Duration`
/// saturate to `Duration::MAX`.
pub fn parse_retry_after_at(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = raw.parse::<f64>() {
        if secs.is_finite() && secs >= 0.0 {
            return Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX));
        }
        return None;
    }

    let at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

fn parse_header<T: std::str::FromStr>(headers: &HeaderMap, key: &str) -> Option<T> {
    headers.get(key)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn test_retry_after_seconds() {
        let map = headers(&[("retry-after", "2")]);
        assert_eq!(parse_retry_after(&map), Some(Duration::from_secs(2)));

        let map = headers(&[("retry-after", "0.5")]);
        assert_eq!(parse_retry_after(&map), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_retry_after_http_date() {
        let now = DateTime::parse_from_rfc2822("Wed, 21 Oct 2015 07:28:00 GMT")
            .unwrap()
            .with_timezone(&Utc);
        let map = headers(&[("retry-after", "Wed, 21 Oct 2015 07:28:30 GMT")]);
        assert_eq!(
            parse_retry_after_at(&map, now),
            Some(Duration::from_secs(30))
        );

        let map = headers(&[("retry-after", "Wed, 21 Oct 2015 07:27:00 GMT")]);
        assert_eq!(parse_retry_after_at(&map, now), Some(Duration::ZERO));
    }

    #[test]
    fn test_retry_after_beyond_duration_range_saturates() {
        let map = headers(&[("retry-after", "1e20")]);
        assert_eq!(parse_retry_after(&map), Some(Duration::MAX));

        let map = headers(&[("retry-after", "10000000000000000000")]);
        assert_eq!(
            parse_retry_after(&map),
            Some(Duration::from_secs(10_000_000_000_000_000_000))
        );
    }

    #[test]
    fn test_retry_after_garbage() {
        assert_eq!(parse_retry_after(&headers(&[("retry-after", "soon")])), None);
        assert_eq!(parse_retry_after(&headers(&[("retry-after", "-3")])), None);
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn test_rate_limit_headers() {
        let map = headers(&[
            ("x-ratelimit-limit", "50"),
            ("x-ratelimit-remaining", "12"),
            ("x-ratelimit-reset", "1700000000"),
        ]);
        let parsed = RateLimitHeaders::from_headers(&map).unwrap();
        assert_eq!(parsed.limit, Some(50));
        assert_eq!(parsed.remaining, Some(12));
        assert_eq!(parsed.reset_at, Some(1_700_000_000));

        assert!(RateLimitHeaders::from_headers(&HeaderMap::new()).is_none());
    }
}
