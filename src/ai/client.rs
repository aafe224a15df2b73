//! LLM (`OpenAI`) API client module
//!
//! Encapsulates all calls to the text-generation backend. Requests go to an
//! OpenAI-compatible Responses API; the base URL is configurable so the client
//! can point at a proxy or a local mock.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use super::TextGenerator;
use crate::core::config::AppConfig;
use crate::errors::BotError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 1000,
        }
    }
}

/// LLM API client for code explanations and summaries
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
    params: GenerationParams,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, org_id: Option<String>, model_name: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_key,
            org_id,
            model_name,
            base_url: crate::core::config::DEFAULT_OPENAI_BASE_URL.to_string(),
            params: GenerationParams::default(),
        }
    }

    /// # Errors
    ///
    /// Returns `BotError::Config` if `OPENAI_API_KEY` is not set.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        Ok(Self::new(
            config.require_openai_api_key()?.to_string(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
        )
        .with_base_url(&config.openai_base_url))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Send one finished prompt as a single user turn.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Generation` if the request cannot be sent, the
    /// backend answers with a non-success status, the body is not JSON, or it
    /// carries no output text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, BotError> {
        #[cfg(feature = "debug-logs")]
        info!("Using generation prompt:\n{}", prompt);

        let estimated_input_tokens = estimate_tokens(prompt);

        info!(
            model = %self.model_name,
            estimated_input_tokens,
            "Requesting completion"
        );

        let request_body = json!({
            "model": self.model_name,
            "input": build_input(prompt),
            "temperature": self.params.temperature,
            "max_output_tokens": self.params.max_output_tokens,
        });

        let mut request = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BotError::Generation(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(BotError::Generation(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| BotError::Generation(format!("Failed to parse OpenAI response: {e}")))?;

        let text = extract_output_text(&response_json)
            .ok_or_else(|| BotError::Generation("No text in response".to_string()))?;

        debug!(output_chars = text.chars().count(), "Completion received");
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        self.generate_text(prompt).await
    }
}

/// Pull the completion text out of a Responses API body.
///
/// Prefers the top-level `output_text` convenience field and falls back to
/// concatenating every `output_text` part of every output item.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    let text = response_json
        .get("output_text")
        .and_then(|v| v.as_str())
        .map(std::string::ToString::to_string)
        .or_else(|| {
            let mut collected: Vec<String> = Vec::new();
            if let Some(items) = response_json.get("output").and_then(|o| o.as_array()) {
                for item in items {
                    let Some(parts) = item.get("content").and_then(|c| c.as_array()) else {
                        continue;
                    };
                    for p in parts {
                        let is_output_text = p
                            .get("type")
                            .and_then(|t| t.as_str())
                            .is_some_and(|t| t == "output_text");
                        if !is_output_text {
                            continue;
                        }
                        if let Some(s) = p.get("text").and_then(|t| t.as_str()) {
                            collected.push(s.to_string());
                        } else if let Some(s) = p
                            .get("text")
                            .and_then(|t| t.get("value"))
                            .and_then(|v| v.as_str())
                        {
                            collected.push(s.to_string());
                        }
                    }
                }
            }
            if collected.is_empty() {
                None
            } else {
                Some(collected.join("\n"))
            }
        })?;

    if text.trim().is_empty() { None } else { Some(text) }
}

/// Responses API `input` carrying the prompt as one user message.
fn build_input(prompt: &str) -> Value {
    json!([{
        "role": "user",
        "content": [{ "type": "input_text", "text": prompt }]
    }])
}
