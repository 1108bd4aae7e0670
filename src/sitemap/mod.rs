//! Sitemap module for indexscope
//!
//! This module loads candidate URLs from XML sitemaps:
//! - Fetching, with optional proxy fallbacks
//! - Parsing URL sets and sitemap indexes
//! - Following nested indexes

mod fetch;
mod parser;

pub use fetch::SitemapLoader;
pub use parser::{parse_sitemap, SitemapDocument};

use thiserror::Error;

/// Errors that can occur while loading a sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Invalid sitemap URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch sitemap: {0}")]
    Fetch(String),

    #[error("Invalid XML format: {0}")]
    InvalidXml(String),
}
