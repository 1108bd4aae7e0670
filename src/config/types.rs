use serde::Deserialize;

/// Default number of inspection requests allowed in flight at once
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Hard upper bound on the number of URLs in a single batch
pub const MAX_BATCH_SIZE: usize = 1000;

/// Main configuration structure for indexscope
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub inspection: InspectionConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// Remote API endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the URL Inspection API
    #[serde(rename = "inspection-endpoint", default = "default_inspection_endpoint")]
    pub inspection_endpoint: String,

    /// Base URL of the webmasters API used to list properties
    #[serde(rename = "sites-endpoint", default = "default_sites_endpoint")]
    pub sites_endpoint: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            inspection_endpoint: default_inspection_endpoint(),
            sites_endpoint: default_sites_endpoint(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Access token acquisition
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Environment variable holding a ready-to-use OAuth access token
    #[serde(rename = "token-env", default = "default_token_env")]
    pub token_env: Option<String>,

    /// Shell command that prints an access token on stdout
    #[serde(rename = "token-command", default)]
    pub token_command: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            token_command: None,
        }
    }
}

/// Batch inspection behavior
#[derive(Debug, Clone, Deserialize)]
pub struct InspectionConfig {
    /// Maximum number of inspection requests outstanding at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Largest batch accepted before any request is sent
    #[serde(rename = "max-batch-size", default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for client-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives exported reports
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Formats written automatically after each batch
    #[serde(default)]
    pub formats: Vec<ExportFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            formats: Vec::new(),
        }
    }
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension used for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Sitemap loading configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapConfig {
    /// Fallback fetch URLs tried after a direct fetch fails; `{url}` is replaced
    /// by the percent-encoded sitemap URL
    #[serde(default)]
    pub proxies: Vec<String>,

    /// How many levels of nested sitemap indexes are followed
    #[serde(rename = "max-depth", default = "default_sitemap_depth")]
    pub max_depth: u32,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            max_depth: default_sitemap_depth(),
        }
    }
}

fn default_inspection_endpoint() -> String {
    "https://searchconsole.googleapis.com".to_string()
}

fn default_sites_endpoint() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_token_env() -> Option<String> {
    Some("GSC_ACCESS_TOKEN".to_string())
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_max_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_sitemap_depth() -> u32 {
    3
}
