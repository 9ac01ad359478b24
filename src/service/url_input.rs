//! URL input checks run before any network call.

use url::Url;

use crate::error::{AppError, Result};

/// Strict parse; web URLs must also carry a host.
pub fn validate(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => parsed.host_str().is_some_and(|h| !h.is_empty()),
            _ => true,
        },
        Err(_) => false,
    }
}

/// Prefix `https://` unless an http(s) scheme is already there.
pub fn normalize(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Form-level check: would this input be accepted once normalized?
pub fn is_valid_input(url: &str) -> bool {
    validate(&normalize(url.trim()))
}

/// Normalize and validate user input, returning the URL to analyze.
pub fn prepare(url: &str) -> Result<String> {
    let normalized = normalize(url.trim());
    if !validate(&normalized) {
        tracing::warn!("rejected URL input: {:?}", url);
        return Err(AppError::invalid_input("Invalid URL format"));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_https_when_missing() {
        assert_eq!(normalize("example.com"), "https://example.com");
        assert_eq!(normalize("http://example.com"), "http://example.com");
        assert_eq!(normalize("https://example.com/a?b=c"), "https://example.com/a?b=c");
    }

    #[test]
    fn schemeless_inputs_validate_after_normalize() {
        for input in ["example.com", "www.example.org/path", "sub.domain.io:8080/x?y=1"] {
            assert!(validate(&normalize(input)), "{input} should be accepted");
        }
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        assert!(!validate(""));
        assert!(!validate("not a url"));
        assert!(!validate(&normalize("")));
        assert!(!validate(&normalize("not a url")));
        assert!(!is_valid_input("   "));
    }

    #[test]
    fn prepare_reports_invalid_input() {
        let err = prepare("not a url").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid URL format");
        assert_eq!(prepare("  example.com ").unwrap(), "https://example.com");
    }
}
