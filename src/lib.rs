//! indexscope: batch URL index inspection for Search Console properties
//!
//! This crate loads a list of URLs (pasted text, a file, or a sitemap), inspects
//! each one against the URL Inspection API through a bounded worker pool, and
//! reports which pages are indexed, which are not, and which failed.

pub mod api;
pub mod batch;
pub mod config;
pub mod output;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for indexscope operations
#[derive(Debug, Error)]
pub enum IndexScopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("API error: {0}")]
    Api(#[from] api::ApiError),

    #[error("Batch error: {0}")]
    Batch(#[from] batch::BatchError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] sitemap::SitemapError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for indexscope operations
pub type Result<T> = std::result::Result<T, IndexScopeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use batch::{
    classify, inspect_batch, BatchRequest, BatchRun, IndexCategory, InspectionOutcome,
    InspectionRequest, Inspector, ProgressSink, Tallies,
};
pub use config::Config;
pub use crate::url::{extract_urls, is_valid_url};
