//! Structural URL validation for shorten requests.
//!
//! Accepts bare hosts such as `example.com/page` the same way browsers do: the
//! input is checked as if `http://` had been typed in front of it.

use url::{Host, Url};

/// Longest URL accepted for shortening.
pub const MAX_URL_LEN: usize = 2083;

/// Reasons a URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL exceeds {MAX_URL_LEN} characters")]
    TooLong,

    #[error("URL contains whitespace")]
    Whitespace,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Invalid host: {0}")]
    InvalidHost(String),
}

/// Validates that `input` is a well-formed HTTP(S) URL, with or without a scheme.
///
/// # Rules
///
/// 1. **Shape**: non-empty, at most [`MAX_URL_LEN`] characters, no whitespace
/// 2. **Protocol**: an explicit scheme must be `http` or `https`
/// 3. **Host**: an IP address, `localhost`, or a dotted domain whose labels are
///    alphanumeric/hyphen and whose top-level label has at least two characters
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] rule the input breaks.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("example.com/page").is_ok());
/// assert!(validate_url("https://example.com").is_ok());
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if input.len() > MAX_URL_LEN {
        return Err(UrlValidationError::TooLong);
    }
    if input.chars().any(char::is_whitespace) {
        return Err(UrlValidationError::Whitespace);
    }

    let candidate = if has_explicit_scheme(input) {
        input.to_string()
    } else {
        format!("http://{input}")
    };

    let url =
        Url::parse(&candidate).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        Some(Host::Domain(domain)) => validate_domain(domain),
        None => Err(UrlValidationError::InvalidHost(String::new())),
    }
}

/// True when `input` starts with `scheme://`, ignoring `://` that only appears
/// later in a path or query string.
fn has_explicit_scheme(input: &str) -> bool {
    input
        .find("://")
        .is_some_and(|i| !input[..i].contains(['/', '?', '#']))
}

fn validate_domain(domain: &str) -> Result<(), UrlValidationError> {
    let invalid = || UrlValidationError::InvalidHost(domain.to_string());

    if domain == "localhost" {
        return Ok(());
    }

    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid());
    }

    for label in &labels {
        if label.is_empty()
            || label.len() > 63
            || label.starts_with('-')
            || label.ends_with('-')
            || !label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(invalid());
        }
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    Ok(())
}
