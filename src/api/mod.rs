//! Search Console API module
//!
//! This module handles everything that talks to the remote API:
//! - Access token acquisition and refresh
//! - Authenticated JSON requests with a single refresh-and-retry on 401
//! - Listing the properties the user can inspect
//! - Inspecting a single URL

mod auth;
mod client;
mod inspect;
mod sites;

pub use auth::{token_provider_from_config, CommandToken, StaticToken, TokenProvider};
pub use client::{build_http_client, error_message_from_body, user_agent_string, ApiClient};
pub use inspect::{ApiInspector, DEFAULT_FAILURE_MESSAGE};
pub use sites::{filter_sites, list_sites, property_link, SiteEntry};

use thiserror::Error;

/// Errors raised while talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Missing access token: environment variable {0} is not set")]
    MissingToken(String),

    #[error("Token command failed: {0}")]
    TokenCommand(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
