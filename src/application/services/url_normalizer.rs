//! URL canonicalization and domain loop prevention.

use crate::utils::url_validator::{UrlValidationError, validate_url};

/// Scheme-aware URL helper bound to the service's own domain.
///
/// Constructed from configuration; holds no other state.
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    domain: String,
}

impl UrlNormalizer {
    /// Creates a normalizer that treats `domain` as the service's own host.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Checks that `url` is structurally valid before any other processing.
    ///
    /// # Errors
    ///
    /// See [`validate_url`].
    pub fn validate(&self, url: &str) -> Result<(), UrlValidationError> {
        validate_url(url)
    }

    /// Prefixes `http://` unless the URL already starts with an HTTP(S) scheme.
    ///
    /// Pure string transform; does not check well-formedness.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// assert_eq!(n.enforce_scheme("example.com"), "http://example.com");
    /// assert_eq!(n.enforce_scheme("https://example.com"), "https://example.com");
    /// ```
    pub fn enforce_scheme(&self, url: &str) -> String {
        if has_http_scheme(url) {
            url.to_string()
        } else {
            format!("http://{url}")
        }
    }

    /// Returns true if `url` points at this service's own domain.
    ///
    /// Strips one leading `http://`, then one `https://` (either in any case),
    /// then one `www.`, takes everything before the first `/` and compares it
    /// case-sensitively with the configured domain.
    pub fn is_self_referential(&self, url: &str) -> bool {
        let rest = strip_prefix_ignore_case(url, "http://").unwrap_or(url);
        let rest = strip_prefix_ignore_case(rest, "https://").unwrap_or(rest);
        let rest = rest.strip_prefix("www.").unwrap_or(rest);

        let host = rest.split('/').next().unwrap_or(rest);
        host == self.domain
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &s[prefix.len()..])
}

fn has_http_scheme(url: &str) -> bool {
    strip_prefix_ignore_case(url, "http://").is_some()
        || strip_prefix_ignore_case(url, "https://").is_some()
}
