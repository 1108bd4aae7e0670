use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a string as an absolute URL with a scheme and a host
///
/// # Arguments
///
/// * `input` - The candidate URL, already trimmed
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The text is not an absolute URL, or it has no host
///
/// # Examples
///
/// ```
/// use indexscope::url::parse_absolute_url;
///
/// let url = parse_absolute_url("https://example.com/page").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(parse_absolute_url("/relative/path").is_err());
/// ```
pub fn parse_absolute_url(input: &str) -> UrlResult<Url> {
    let url = Url::parse(input).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost(input.to_string())),
    }
}

/// Returns true if the string is a syntactically valid absolute URL
pub fn is_valid_url(input: &str) -> bool {
    parse_absolute_url(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("https://example.com/path?q=1#frag"));
        assert!(is_valid_url("http://127.0.0.1:8080/"));
        assert!(is_valid_url("https://sub.example.co.uk/a/b/"));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("example.com/page"));
        assert!(!is_valid_url("/relative"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn test_url_without_host_is_rejected() {
        let result = parse_absolute_url("mailto:someone@example.com");
        assert!(matches!(result, Err(UrlError::MissingHost(_))));
    }
}
