//! Access token providers
//!
//! The API accepts OAuth bearer tokens with the `webmasters.readonly` scope.
//! Tokens come either from an environment variable or from a command such as
//! `gcloud auth print-access-token`; only the command provider can refresh.

use crate::api::{ApiError, ApiResult};
use crate::config::AuthConfig;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::Mutex;

/// Source of bearer tokens for API requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the current token, acquiring one if needed
    async fn access_token(&self) -> ApiResult<String>;

    /// Replaces a token the API rejected and returns the one to retry with
    async fn refresh(&self, rejected: &str) -> ApiResult<String>;
}

/// A fixed token that cannot be refreshed
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Reads the token from an environment variable
    pub fn from_env(var: &str) -> ApiResult<Self> {
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(ApiError::MissingToken(var.to_string())),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> ApiResult<String> {
        Ok(self.token.clone())
    }

    async fn refresh(&self, _rejected: &str) -> ApiResult<String> {
        Err(ApiError::AuthRequired)
    }
}

/// Token printed by a shell command, cached until refreshed
pub struct CommandToken {
    command: String,
    cached: Mutex<Option<String>>,
}

impl CommandToken {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cached: Mutex::new(None),
        }
    }

    async fn run(&self) -> ApiResult<String> {
        let (shell, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        tracing::debug!("Running token command: {}", self.command);
        let output = Command::new(shell)
            .arg(flag)
            .arg(&self.command)
            .output()
            .await
            .map_err(|e| ApiError::TokenCommand(format!("{}: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApiError::TokenCommand(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(ApiError::TokenCommand(format!(
                "'{}' printed no token",
                self.command
            )));
        }

        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for CommandToken {
    async fn access_token(&self) -> ApiResult<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.run().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn refresh(&self, rejected: &str) -> ApiResult<String> {
        let mut cached = self.cached.lock().await;

        // Another request already replaced the rejected token
        if let Some(token) = cached.as_ref().filter(|token| token.as_str() != rejected) {
            return Ok(token.clone());
        }

        *cached = None;
        let token = self.run().await?;
        *cached = Some(token.clone());
        tracing::info!("Access token refreshed");
        Ok(token)
    }
}

/// Builds the token provider described by the `[auth]` section
///
/// A configured command wins over the environment variable.
pub fn token_provider_from_config(config: &AuthConfig) -> ApiResult<Arc<dyn TokenProvider>> {
    if let Some(command) = &config.token_command {
        return Ok(Arc::new(CommandToken::new(command.clone())));
    }

    match &config.token_env {
        Some(var) => Ok(Arc::new(StaticToken::from_env(var)?)),
        None => Err(ApiError::AuthRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_cannot_refresh() {
        let provider = StaticToken::new("abc");
        assert_eq!(provider.access_token().await.unwrap(), "abc");
        assert!(matches!(
            provider.refresh("abc").await,
            Err(ApiError::AuthRequired)
        ));
    }

    #[test]
    fn test_static_token_from_missing_env() {
        let result = StaticToken::from_env("INDEXSCOPE_TEST_TOKEN_THAT_IS_NOT_SET");
        assert!(matches!(result, Err(ApiError::MissingToken(_))));
    }

    #[test]
    fn test_command_wins_over_env() {
        let config = AuthConfig {
            token_env: Some("INDEXSCOPE_TEST_TOKEN_THAT_IS_NOT_SET".to_string()),
            token_command: Some("echo token".to_string()),
        };
        assert!(token_provider_from_config(&config).is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_token_caches_and_refreshes() {
        let provider = CommandToken::new("echo '  token-123  '");
        assert_eq!(provider.access_token().await.unwrap(), "token-123");
        assert_eq!(provider.access_token().await.unwrap(), "token-123");
        assert_eq!(provider.refresh("token-123").await.unwrap(), "token-123");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_concurrent_refreshes_run_command_once() {
        let dir = tempfile::tempdir().unwrap();
        let counter = dir.path().join("count");
        let provider = CommandToken::new(format!(
            "n=$(cat '{0}' 2>/dev/null || echo 0); n=$((n + 1)); echo $n > '{0}'; echo token-$n",
            counter.display()
        ));

        assert_eq!(provider.access_token().await.unwrap(), "token-1");

        let (first, second) = tokio::join!(provider.refresh("token-1"), provider.refresh("token-1"));
        assert_eq!(first.unwrap(), "token-2");
        assert_eq!(second.unwrap(), "token-2");
        assert_eq!(std::fs::read_to_string(&counter).unwrap().trim(), "2");

        assert_eq!(provider.refresh("token-2").await.unwrap(), "token-3");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_token_failures() {
        let failing = CommandToken::new("echo denied >&2; exit 3");
        match failing.access_token().await {
            Err(ApiError::TokenCommand(message)) => assert!(message.contains("denied")),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }

        let silent = CommandToken::new("true");
        assert!(matches!(
            silent.access_token().await,
            Err(ApiError::TokenCommand(_))
        ));
    }
}
