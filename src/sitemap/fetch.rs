//! Sitemap fetching with proxy fallback and nested index loading

use crate::config::SitemapConfig;
use crate::sitemap::parser::{parse_sitemap, SitemapDocument};
use crate::sitemap::SitemapError;
use crate::url::is_valid_url;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use url::form_urlencoded::byte_serialize;

/// Loads page URLs from a sitemap or sitemap index
pub struct SitemapLoader {
    client: Client,
    proxies: Vec<String>,
    max_depth: u32,
}

impl SitemapLoader {
    pub fn new(client: Client, config: &SitemapConfig) -> Self {
        Self {
            client,
            proxies: config.proxies.clone(),
            max_depth: config.max_depth,
        }
    }

    /// Loads every page URL reachable from the sitemap at `url`
    ///
    /// Sitemap indexes are followed up to the configured depth. A child sitemap
    /// that cannot be loaded is logged and skipped; only a failure of the
    /// top-level document is an error.
    pub async fn load(&self, url: &str) -> Result<Vec<String>, SitemapError> {
        if !is_valid_url(url) {
            return Err(SitemapError::InvalidUrl(url.to_string()));
        }

        let urls = self.load_at_depth(url.to_string(), 0).await?;
        tracing::info!("Loaded {} URLs from sitemap {}", urls.len(), url);
        Ok(urls)
    }

    fn load_at_depth(&self, url: String, depth: u32) -> BoxFuture<'_, Result<Vec<String>, SitemapError>> {
        async move {
            let xml = self.fetch_text(&url).await?;

            match parse_sitemap(&xml)? {
                SitemapDocument::UrlSet(urls) => Ok(urls),
                SitemapDocument::Index(children) => {
                    if depth >= self.max_depth {
                        tracing::warn!(
                            "Not following {} child sitemaps of {}: nesting deeper than {}",
                            children.len(),
                            url,
                            self.max_depth
                        );
                        return Ok(Vec::new());
                    }

                    tracing::info!("Loading sitemap index {} ({} sitemaps)", url, children.len());
                    let mut urls = Vec::new();
                    for (i, child) in children.into_iter().enumerate() {
                        tracing::debug!("Loading child sitemap {}: {}", i + 1, child);
                        match self.load_at_depth(child.clone(), depth + 1).await {
                            Ok(child_urls) => urls.extend(child_urls),
                            Err(e) => tracing::warn!("Failed to load child sitemap {}: {}", child, e),
                        }
                    }
                    Ok(urls)
                }
            }
        }
        .boxed()
    }

    /// Fetches the sitemap body, trying a direct request then each proxy
    pub async fn fetch_text(&self, url: &str) -> Result<String, SitemapError> {
        let mut last_error = None;

        for candidate in self.candidates(url) {
            match self.fetch_once(&candidate).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!("Sitemap fetch via {} failed: {}", candidate, e);
                    last_error = Some(e);
                }
            }
        }

        Err(SitemapError::Fetch(
            last_error.unwrap_or_else(|| "Failed to fetch sitemap".to_string()),
        ))
    }

    /// Fetch URLs in the order they are tried
    fn candidates(&self, url: &str) -> Vec<String> {
        let encoded: String = byte_serialize(url.as_bytes()).collect();

        std::iter::once(url.to_string())
            .chain(self.proxies.iter().map(|proxy| proxy.replace("{url}", &encoded)))
            .collect()
    }

    async fn fetch_once(&self, url: &str) -> Result<String, String> {
        let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response.text().await.map_err(|e| e.to_string())
    }
}
