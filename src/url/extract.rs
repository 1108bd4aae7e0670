use crate::url::validate::is_valid_url;

/// Extracts the inspectable URLs from raw multi-line text
///
/// Each line is trimmed; empty lines and lines that are not absolute URLs are
/// dropped without error. The remaining URLs keep their input order and
/// duplicates are preserved, so each occurrence is inspected on its own.
///
/// # Examples
///
/// ```
/// use indexscope::url::extract_urls;
///
/// let urls = extract_urls("https://a.test/\nnot a url\n\n  https://b.test/  ");
/// assert_eq!(urls, vec!["https://a.test/", "https://b.test/"]);
/// ```
pub fn extract_urls(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_valid_url(line))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_invalid_lines() {
        let urls = extract_urls("https://a.test/\nnot a url\nhttps://b.test/");
        assert_eq!(urls, vec!["https://a.test/", "https://b.test/"]);
    }

    #[test]
    fn test_trims_and_skips_blank_lines() {
        let urls = extract_urls("\n   \n\thttps://a.test/page \r\n\n");
        assert_eq!(urls, vec!["https://a.test/page"]);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let urls = extract_urls("https://c.test/\nhttps://a.test/\nhttps://c.test/");
        assert_eq!(
            urls,
            vec!["https://c.test/", "https://a.test/", "https://c.test/"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("\n\n").is_empty());
    }
}
