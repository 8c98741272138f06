//! URL normalization and acceptance policy.
//!
//! Three rules gate every URL entering the store: a scheme prefix is added
//! when missing, the result must parse as an absolute URL, and the target
//! must not point back at this service's own domain (which would create a
//! redirect loop through the shortener).

use url::Url;

/// Errors that can occur while checking an incoming URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlRuleError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Prefixes `http://` when the URL carries no scheme.
///
/// The check is a conjunction: only a URL that lacks `http://` *and* lacks
/// `https://` gets the prefix. A URL already carrying `https://` must pass
/// through untouched.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(ensure_http_prefix("example.com"), "http://example.com");
/// assert_eq!(ensure_http_prefix("https://example.com"), "https://example.com");
/// ```
pub fn ensure_http_prefix(url: &str) -> String {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("http://{}", url)
    } else {
        url.to_string()
    }
}

/// Validates that `url` is a well-formed absolute URL with a host.
///
/// Expected to run on the output of [`ensure_http_prefix`], so a bare
/// `example.com` has already been promoted to `http://example.com` before
/// parsing.
///
/// # Errors
///
/// Returns [`UrlRuleError::InvalidFormat`] for unparseable input and
/// [`UrlRuleError::MissingHost`] for host-less URLs.
pub fn validate_syntax(url: &str) -> Result<(), UrlRuleError> {
    let parsed = Url::parse(url).map_err(|e| UrlRuleError::InvalidFormat(e.to_string()))?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlRuleError::MissingHost);
    }

    Ok(())
}

/// Returns whether `url` points at this service's own domain.
///
/// Strips an optional `http://`/`https://` scheme and an optional leading
/// `www.`, truncates at the first path separator, and compares the remaining
/// host for exact equality with `own_domain`. Subdomains other than `www`
/// are *not* collapsed — `evil.example.com` is a different host than
/// `example.com`.
pub fn is_own_domain(url: &str, own_domain: &str) -> bool {
    if url == own_domain {
        return true;
    }

    let host = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host.split('/').next().unwrap_or(host);

    host == own_domain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_added_when_missing() {
        assert_eq!(ensure_http_prefix("example.com"), "http://example.com");
        assert_eq!(
            ensure_http_prefix("example.com/path?q=1"),
            "http://example.com/path?q=1"
        );
    }

    #[test]
    fn test_prefix_preserves_http() {
        assert_eq!(
            ensure_http_prefix("http://example.com"),
            "http://example.com"
        );
    }

    #[test]
    fn test_prefix_preserves_https() {
        // The check must be conjunctive: an https URL lacks the http://
        // prefix but must not be re-prefixed.
        assert_eq!(
            ensure_http_prefix("https://example.com"),
            "https://example.com"
        );
    }

    #[test]
    fn test_validate_accepts_absolute_urls() {
        assert!(validate_syntax("http://example.com").is_ok());
        assert!(validate_syntax("https://sub.example.com/a/b?q=1").is_ok());
        assert!(validate_syntax("http://192.168.1.1:8080/api").is_ok());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(matches!(
            validate_syntax("http://not a url"),
            Err(UrlRuleError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_host() {
        assert!(matches!(
            validate_syntax("http:///path-only"),
            Err(UrlRuleError::MissingHost) | Err(UrlRuleError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_own_domain_exact_match() {
        assert!(is_own_domain("short.test", "short.test"));
        assert!(is_own_domain("http://short.test", "short.test"));
        assert!(is_own_domain("https://short.test", "short.test"));
    }

    #[test]
    fn test_own_domain_strips_www_and_path() {
        assert!(is_own_domain("http://www.short.test/abc123", "short.test"));
        assert!(is_own_domain("www.short.test", "short.test"));
        assert!(is_own_domain("short.test/abc123", "short.test"));
    }

    #[test]
    fn test_other_domains_pass() {
        assert!(!is_own_domain("http://example.com", "short.test"));
        assert!(!is_own_domain("example.com/short.test", "short.test"));
    }

    #[test]
    fn test_subdomains_are_distinct_hosts() {
        assert!(!is_own_domain("http://evil.short.test/x", "short.test"));
    }
}
