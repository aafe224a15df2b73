//! Inspirational quote lookup for `$inspire`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use crate::core::config::AppConfig;
use crate::errors::BotError;

/// One entry of the quote service's JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    #[serde(rename = "q")]
    pub text: String,
    #[serde(rename = "a")]
    pub author: String,
}

impl Quote {
    /// Render as `"<quote> -<author>"`.
    #[must_use]
    pub fn format(&self) -> String {
        format!("{} -{}", self.text, self.author)
    }
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `BotError::Network` when no quote can be fetched.
    async fn random_quote(&self) -> Result<Quote, BotError>;
}

/// Take the first quote out of a quote-service response body.
///
/// # Errors
///
/// Returns `BotError::Network` if the body is not a JSON array of quotes or
/// the array is empty.
pub fn parse_quote_payload(body: &str) -> Result<Quote, BotError> {
    let quotes: Vec<Quote> = serde_json::from_str(body)
        .map_err(|e| BotError::Network(format!("Malformed quote payload: {e}")))?;
    quotes
        .into_iter()
        .next()
        .ok_or_else(|| BotError::Network("Quote service returned no quotes".to_string()))
}

/// HTTP client for a zenquotes-compatible endpoint.
pub struct QuoteClient {
    http: Client,
    url: String,
}

impl QuoteClient {
    #[must_use]
    pub fn new(url: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, url }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.quote_api_url.clone())
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn random_quote(&self) -> Result<Quote, BotError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BotError::Network(format!("Quote request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Network(format!("Quote service returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::Network(format!("Failed to read quote response: {e}")))?;

        let quote = parse_quote_payload(&body)?;
        info!(author = %quote.author, "Fetched quote");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    #[test]
    fn test_parse_and_format_quote() {
        let quote = parse_quote_payload(r#"[{"q":"Do or do not.","a":"Yoda"}]"#).unwrap();
        assert_eq!(quote.format(), "Do or do not. -Yoda");
    }

    #[test]
    fn test_parse_ignores_extra_fields_and_entries() {
        let body = r#"[{"q":"First.","a":"One","h":"<blockquote/>"},{"q":"Second.","a":"Two"}]"#;
        assert_eq!(parse_quote_payload(body).unwrap().format(), "First. -One");
    }

    #[test]
    fn test_parse_rejects_empty_or_malformed() {
        assert!(matches!(parse_quote_payload("[]"), Err(BotError::Network(_))));
        assert!(matches!(
            parse_quote_payload(r#"{"q":"x","a":"y"}"#),
            Err(BotError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_client_fetches_quote() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/random");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"[{"q":"Do or do not.","a":"Yoda"}]"#);
            })
            .await;

        let client = QuoteClient::new(server.url("/api/random"));
        let quote = client.random_quote().await.unwrap();

        mock.assert_async().await;
        assert_eq!(quote.format(), "Do or do not. -Yoda");
    }

    #[tokio::test]
    async fn test_client_maps_error_status_to_network_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/random");
                then.status(503);
            })
            .await;

        let err = QuoteClient::new(server.url("/api/random"))
            .random_quote()
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Network(ref m) if m.contains("503")));
    }
}
