use std::env;
use std::str::FromStr;

use crate::errors::BotError;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_QUOTE_API_URL: &str = "https://zenquotes.io/api/random";
pub const DEFAULT_SLACK_API_BASE_URL: &str = "https://slack.com/api";
pub const DEFAULT_CHUNK_SIZE: usize = crate::document::DEFAULT_CHUNK_SIZE;
pub const DEFAULT_INLINE_MESSAGE_LIMIT: usize = 2000;
pub const DEFAULT_SUMMARY_CONCURRENCY: usize = 1;
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 20 * 1024 * 1024;

/// Runtime configuration shared by both Lambdas.
///
/// Secrets that only one side needs are optional here; the side that needs
/// them asks through the `require_*` accessors so a missing variable fails the
/// invocation with a `BotError::Config` naming it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: Option<String>,
    pub slack_signing_secret: Option<String>,
    pub processing_queue_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub quote_api_url: String,
    pub slack_api_base_url: String,
    pub chunk_size: usize,
    pub inline_message_limit: usize,
    pub summary_concurrency: usize,
    pub max_attachment_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slack_bot_token: None,
            slack_signing_secret: None,
            processing_queue_url: None,
            openai_api_key: None,
            openai_org_id: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
            slack_api_base_url: DEFAULT_SLACK_API_BASE_URL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            inline_message_limit: DEFAULT_INLINE_MESSAGE_LIMIT,
            summary_concurrency: DEFAULT_SUMMARY_CONCURRENCY,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `BotError::Config` if a numeric variable does not parse or a
    /// size that must be positive is zero.
    pub fn from_env() -> Result<Self, BotError> {
        let config = Self {
            slack_bot_token: env::var("SLACK_BOT_TOKEN").ok(),
            slack_signing_secret: env::var("SLACK_SIGNING_SECRET").ok(),
            processing_queue_url: env::var("PROCESSING_QUEUE_URL").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            quote_api_url: env::var("QUOTE_API_URL")
                .unwrap_or_else(|_| DEFAULT_QUOTE_API_URL.to_string()),
            slack_api_base_url: env::var("SLACK_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SLACK_API_BASE_URL.to_string()),
            chunk_size: parse_var("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            inline_message_limit: parse_var(
                "INLINE_MESSAGE_LIMIT",
                DEFAULT_INLINE_MESSAGE_LIMIT,
            )?,
            summary_concurrency: parse_var(
                "SUMMARY_CONCURRENCY",
                DEFAULT_SUMMARY_CONCURRENCY,
            )?,
            max_attachment_bytes: parse_var(
                "MAX_ATTACHMENT_BYTES",
                DEFAULT_MAX_ATTACHMENT_BYTES,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `BotError::Config` when a size that must be positive is zero.
    pub fn validate(&self) -> Result<(), BotError> {
        if self.chunk_size == 0 {
            return Err(BotError::Config("CHUNK_SIZE must be greater than 0".to_string()));
        }
        if self.summary_concurrency == 0 {
            return Err(BotError::Config(
                "SUMMARY_CONCURRENCY must be greater than 0".to_string(),
            ));
        }
        if self.max_attachment_bytes == 0 {
            return Err(BotError::Config(
                "MAX_ATTACHMENT_BYTES must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// # Errors
    pub fn require_slack_bot_token(&self) -> Result<&str, BotError> {
        required(self.slack_bot_token.as_deref(), "SLACK_BOT_TOKEN")
    }

    /// # Errors
    pub fn require_slack_signing_secret(&self) -> Result<&str, BotError> {
        required(self.slack_signing_secret.as_deref(), "SLACK_SIGNING_SECRET")
    }

    /// # Errors
    pub fn require_processing_queue_url(&self) -> Result<&str, BotError> {
        required(self.processing_queue_url.as_deref(), "PROCESSING_QUEUE_URL")
    }

    /// # Errors
    pub fn require_openai_api_key(&self) -> Result<&str, BotError> {
        required(self.openai_api_key.as_deref(), "OPENAI_API_KEY")
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, BotError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BotError::Config(format!("{name} is not set")))
}

fn parse_var<T>(name: &str, default: T) -> Result<T, BotError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| BotError::Config(format!("{name}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_documented_limits() {
        let config = AppConfig::default();
        assert_eq!(config.chunk_size, 2000);
        assert_eq!(config.inline_message_limit, 2000);
        assert_eq!(config.summary_concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let config = AppConfig {
            chunk_size: 0,
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("CHUNK_SIZE"));
    }

    #[test]
    fn test_require_reports_missing_variable() {
        let config = AppConfig::default();
        let err = config.require_openai_api_key().unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: OPENAI_API_KEY is not set");

        let config = AppConfig {
            slack_bot_token: Some("xoxb-test".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.require_slack_bot_token().unwrap(), "xoxb-test");
    }
}
