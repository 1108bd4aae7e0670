//! Property listing and filtering

use crate::api::client::ApiClient;
use crate::api::ApiResult;
use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

/// A property the authenticated user has access to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    /// Property identifier, e.g. `https://example.com/` or `sc-domain:example.com`
    pub site_url: String,

    /// The user's permission level on the property
    #[serde(default)]
    pub permission_level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SitesResponse {
    #[serde(default)]
    site_entry: Vec<SiteEntry>,
}

/// Lists the user's properties, sorted by site URL
///
/// # Arguments
///
/// * `client` - Authenticated API client
/// * `sites_endpoint` - Base URL of the webmasters API
pub async fn list_sites(client: &ApiClient, sites_endpoint: &str) -> ApiResult<Vec<SiteEntry>> {
    let url = format!("{}/webmasters/v3/sites", sites_endpoint.trim_end_matches('/'));
    let response: SitesResponse = client.get_json(&url).await?;

    let mut sites = response.site_entry;
    sites.sort_by(|a, b| a.site_url.cmp(&b.site_url));

    tracing::debug!("Loaded {} properties", sites.len());
    Ok(sites)
}

/// Keeps the properties whose site URL contains `term`, ignoring case
pub fn filter_sites<'a>(sites: &'a [SiteEntry], term: &str) -> Vec<&'a SiteEntry> {
    let term = term.trim().to_lowercase();
    sites
        .iter()
        .filter(|site| site.site_url.to_lowercase().contains(&term))
        .collect()
}

/// Link to the property in the Search Console web UI
pub fn property_link(site_url: &str) -> String {
    let encoded: String = byte_serialize(site_url.as_bytes()).collect();
    format!(
        "https://search.google.com/search-console?resource_id={}",
        encoded
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(url: &str) -> SiteEntry {
        SiteEntry {
            site_url: url.to_string(),
            permission_level: Some("siteOwner".to_string()),
        }
    }

    #[test]
    fn test_filter_sites_ignores_case() {
        let sites = vec![
            site("https://Blog.example.com/"),
            site("sc-domain:example.org"),
            site("https://shop.test/"),
        ];

        let matches = filter_sites(&sites, "EXAMPLE");
        assert_eq!(matches.len(), 2);

        let matches = filter_sites(&sites, "blog");
        assert_eq!(matches[0].site_url, "https://Blog.example.com/");
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let sites = vec![site("https://a.test/"), site("https://b.test/")];
        assert_eq!(filter_sites(&sites, "").len(), 2);
        assert_eq!(filter_sites(&sites, "   ").len(), 2);
    }

    #[test]
    fn test_sites_response_without_entries() {
        let response: SitesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.site_entry.is_empty());
    }

    #[test]
    fn test_property_link_encodes_site() {
        assert_eq!(
            property_link("sc-domain:example.com"),
            "https://search.google.com/search-console?resource_id=sc-domain%3Aexample.com"
        );
        assert_eq!(
            property_link("https://example.com/"),
            "https://search.google.com/search-console?resource_id=https%3A%2F%2Fexample.com%2F"
        );
    }
}
