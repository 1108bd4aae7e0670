//! Authenticated JSON client for the Search Console APIs

use crate::api::auth::TokenProvider;
use crate::api::{ApiError, ApiResult};
use crate::config::UserAgentConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Formats the user agent string sent with every request
///
/// Format: `ClientName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.client_name, config.client_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout_secs` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use indexscope::api::build_http_client;
/// use indexscope::config::UserAgentConfig;
///
/// let config = UserAgentConfig {
///     client_name: "indexscope".to_string(),
///     client_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, 30).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP client that attaches bearer tokens and retries once after a refresh
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(http: Client, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { http, tokens }
    }

    /// Sends an authenticated GET and decodes the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.send(|token| self.http.get(url).bearer_auth(token)).await
    }

    /// Sends an authenticated POST with a JSON body and decodes the JSON response
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(|token| self.http.post(url).bearer_auth(token).json(body)).await
    }

    /// Sends a request; on 401 refreshes the token and sends it once more
    async fn send<T, F>(&self, build: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: Fn(&str) -> RequestBuilder,
    {
        let token = self.tokens.access_token().await?;
        let response = build(&token).send().await?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!("Access token rejected, refreshing and retrying once");
            let token = self.tokens.refresh(&token).await?;
            build(&token).send().await?
        } else {
            response
        };

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message_from_body(&body, status),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extracts `error.message` from an API error body, falling back to `HTTP <code>`
pub fn error_message_from_body(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
