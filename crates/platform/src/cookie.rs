//! Cookie Handling
//!
//! Set-Cookie assembly and Cookie header extraction.

use axum::http::{HeaderMap, header};
use thiserror::Error;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Error while reading the Cookie header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CookieError {
    /// The header is present but not decodable as visible ASCII.
    #[error("malformed Cookie header")]
    MalformedHeader,
}

/// Cookie attributes shared by issuance and voiding
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build a Set-Cookie header value carrying `value` for `max_age_secs`.
    pub fn build_set_cookie(&self, value: &str, max_age_secs: i64) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Max-Age={}", max_age_secs));

        cookie
    }

    /// Build a Set-Cookie header value that voids the cookie: empty value,
    /// already expired.
    pub fn build_void_cookie(&self) -> String {
        self.build_set_cookie("", -1)
    }
}

/// Extract a cookie value from headers.
///
/// Returns `Ok(None)` when no cookie of that name is present and `Err` when
/// the Cookie header exists but cannot be decoded. Callers treat the two
/// cases differently, so absence must not swallow decode failures.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Result<Option<String>, CookieError> {
    let Some(raw) = headers.get(header::COOKIE) else {
        return Ok(None);
    };

    let raw = raw.to_str().map_err(|_| CookieError::MalformedHeader)?;

    Ok(raw.split(';').find_map(|cookie| {
        let (key, value) = cookie.trim().split_once('=')?;

        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_build_set_cookie() {
        let config = CookieConfig {
            name: "test".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        };

        let cookie = config.build_set_cookie("value123", 3600);
        assert!(cookie.starts_with("test=value123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_build_set_cookie_omits_secure_by_default() {
        let cookie = CookieConfig::default().build_set_cookie("v", 60);
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_build_void_cookie() {
        let config = CookieConfig {
            name: "test".to_string(),
            ..Default::default()
        };

        let cookie = config.build_void_cookie();
        assert!(cookie.starts_with("test=;"));
        assert!(cookie.contains("Max-Age=-1"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "session").unwrap(),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_cookie(&headers, "foo").unwrap(),
            Some("bar".to_string())
        );
        assert_eq!(extract_cookie(&headers, "missing").unwrap(), None);
    }

    #[test]
    fn test_extract_cookie_no_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_cookie(&headers, "session").unwrap(), None);
    }

    #[test]
    fn test_extract_cookie_malformed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_bytes(b"session=\xffcorrupt").unwrap(),
        );

        assert_eq!(
            extract_cookie(&headers, "session"),
            Err(CookieError::MalformedHeader)
        );
    }
}
