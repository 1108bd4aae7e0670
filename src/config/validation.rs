use crate::config::types::{
    ApiConfig, AuthConfig, Config, InspectionConfig, OutputConfig, SitemapConfig,
    UserAgentConfig, MAX_BATCH_SIZE,
};
use crate::ConfigError;
use url::Url;

/// Largest concurrency accepted from configuration
const MAX_CONCURRENCY: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_auth_config(&config.auth)?;
    validate_inspection_config(&config.inspection)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_sitemap_config(&config.sitemap)?;
    Ok(())
}

/// Validates API endpoints and timeouts
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    validate_endpoint("inspection_endpoint", &config.inspection_endpoint)?;
    validate_endpoint("sites_endpoint", &config.sites_endpoint)?;

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

fn validate_endpoint(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            name, value
        )));
    }

    Ok(())
}

/// Validates token acquisition settings
fn validate_auth_config(config: &AuthConfig) -> Result<(), ConfigError> {
    if let Some(var) = &config.token_env {
        if var.trim().is_empty() {
            return Err(ConfigError::Validation(
                "token_env cannot be empty".to_string(),
            ));
        }
    }

    if let Some(command) = &config.token_command {
        if command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "token_command cannot be empty".to_string(),
            ));
        }
    }

    if config.token_env.is_none() && config.token_command.is_none() {
        return Err(ConfigError::Validation(
            "auth requires token_env or token_command".to_string(),
        ));
    }

    Ok(())
}

/// Validates batch inspection limits
fn validate_inspection_config(config: &InspectionConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.max_batch_size < 1 || config.max_batch_size > MAX_BATCH_SIZE {
        return Err(ConfigError::Validation(format!(
            "max_batch_size must be between 1 and {}, got {}",
            MAX_BATCH_SIZE, config.max_batch_size
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate client name: non-empty, alphanumeric + hyphens only
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client_name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "client_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.client_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates sitemap fetch settings
fn validate_sitemap_config(config: &SitemapConfig) -> Result<(), ConfigError> {
    for proxy in &config.proxies {
        if !proxy.contains("{url}") {
            return Err(ConfigError::Validation(format!(
                "Sitemap proxy '{}' must contain a {{url}} placeholder",
                proxy
            )));
        }

        let probe = proxy.replace("{url}", "x");
        Url::parse(&probe).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid sitemap proxy '{}': {}", proxy, e))
        })?;
    }

    if config.max_depth < 1 {
        return Err(ConfigError::Validation(
            "sitemap max_depth must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
