//! Slack API client module
//!
//! Encapsulates the Slack Web API calls the bot needs: posting replies,
//! uploading long results as files, and downloading shared attachments.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackTs,
};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::core::config::{AppConfig, DEFAULT_SLACK_API_BASE_URL};
use crate::core::models::{Attachment, ReplyTarget};
use crate::core::platform::ChatPlatform;
use crate::errors::BotError;

/// Hosts that may receive the bot token when downloading attachments.
const SLACK_FILE_HOSTS: &[&str] = &["files.slack.com", "slack-files.com"];

#[derive(Debug, Deserialize)]
struct UploadUrlResponse {
    ok: bool,
    upload_url: Option<String>,
    file_id: Option<String>,
    error: Option<String>,
}

/// Slack Web API client authenticated with the bot token
pub struct SlackClient {
    http: Client,
    token: SlackApiToken,
    api_base: String,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
            api_base: DEFAULT_SLACK_API_BASE_URL.to_string(),
        }
    }

    /// # Errors
    ///
    /// Returns `BotError::Config` if `SLACK_BOT_TOKEN` is not set.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        Ok(Self::new(config.require_slack_bot_token()?.to_string())
            .with_api_base(&config.slack_api_base_url))
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn bearer(&self) -> &str {
        &self.token.token_value.0
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base)
    }

    /// Post a plain-text message, threaded when `target` names a thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or Slack returns `ok: false`.
    pub async fn post_message(&self, target: &ReplyTarget, message: &str) -> Result<(), BotError> {
        let mut request = SlackApiChatPostMessageRequest::new(
            SlackChannelId(target.channel_id.clone()),
            SlackMessageContent::new().with_text(message.to_string()),
        );
        request.thread_ts = target.thread_ts.clone().map(SlackTs::new);

        let resp = self
            .http
            .post(self.method_url("chat.postMessage"))
            .bearer_auth(self.bearer())
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Http(format!("Failed to post message: {e}")))?;

        check_slack_response("chat.postMessage", resp).await?;
        Ok(())
    }

    /// Upload `contents` as a file into the target conversation.
    ///
    /// Uses the external upload flow: reserve an upload URL, send the bytes,
    /// then complete the upload into the channel.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three steps fails.
    pub async fn upload_file(
        &self,
        target: &ReplyTarget,
        filename: &str,
        contents: &[u8],
    ) -> Result<(), BotError> {
        let length = contents.len().to_string();
        let resp = self
            .http
            .post(self.method_url("files.getUploadURLExternal"))
            .bearer_auth(self.bearer())
            .form(&[("filename", filename), ("length", length.as_str())])
            .send()
            .await
            .map_err(|e| BotError::Http(format!("Failed to reserve upload URL: {e}")))?;

        if !resp.status().is_success() {
            return Err(BotError::Slack(format!(
                "files.getUploadURLExternal HTTP {}",
                resp.status()
            )));
        }

        let reserved: UploadUrlResponse = resp.json().await.map_err(|e| {
            BotError::Slack(format!("files.getUploadURLExternal JSON parse error: {e}"))
        })?;

        if !reserved.ok {
            return Err(BotError::Slack(format!(
                "files.getUploadURLExternal error: {}",
                reserved.error.as_deref().unwrap_or("unknown")
            )));
        }

        let (Some(upload_url), Some(file_id)) = (reserved.upload_url, reserved.file_id) else {
            return Err(BotError::Slack(
                "files.getUploadURLExternal response missing upload_url or file_id".to_string(),
            ));
        };

        let upload = self
            .http
            .post(&upload_url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(contents.to_vec())
            .send()
            .await
            .map_err(|e| BotError::Http(format!("Failed to upload file bytes: {e}")))?;

        if !upload.status().is_success() {
            return Err(BotError::Slack(format!(
                "File upload HTTP {}",
                upload.status()
            )));
        }

        let mut complete = json!({
            "files": [{ "id": file_id, "title": filename }],
            "channel_id": target.channel_id,
        });
        if let Some(thread_ts) = &target.thread_ts {
            complete["thread_ts"] = Value::String(thread_ts.clone());
        }

        let resp = self
            .http
            .post(self.method_url("files.completeUploadExternal"))
            .bearer_auth(self.bearer())
            .json(&complete)
            .send()
            .await
            .map_err(|e| BotError::Http(format!("Failed to complete upload: {e}")))?;

        check_slack_response("files.completeUploadExternal", resp).await?;

        info!(
            channel_id = %target.channel_id,
            file_id = %file_id,
            bytes = contents.len(),
            "Uploaded file"
        );
        Ok(())
    }

    /// Download a private Slack file into memory with a strict size cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a Slack file host, the request
    /// fails, Slack responds non-2xx, or the file exceeds `max_bytes`.
    pub async fn download_file(&self, url: &str, max_bytes: usize) -> Result<Vec<u8>, BotError> {
        if max_bytes == 0 {
            return Err(BotError::Config("download max_bytes must be > 0".to_string()));
        }

        if !self.is_trusted_file_url(url) {
            warn!("Refusing to send bot token to non-Slack URL {}", url);
            return Err(BotError::Slack(format!("Not a Slack file URL: {url}")));
        }

        let mut resp = self
            .http
            .get(url)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(|e| BotError::Http(format!("Failed to download Slack file: {e}")))?;

        if !resp.status().is_success() {
            return Err(BotError::Slack(format!(
                "Slack file download HTTP {}",
                resp.status()
            )));
        }

        if let Some(len) = resp.content_length()
            && len > u64::try_from(max_bytes).unwrap_or(u64::MAX)
        {
            return Err(BotError::AttachmentTooLarge(format!(
                "{len}B > {max_bytes}B"
            )));
        }

        let mut out: Vec<u8> = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| {
            BotError::Http(format!("Error reading Slack file download stream: {e}"))
        })? {
            if out.len().saturating_add(chunk.len()) > max_bytes {
                return Err(BotError::AttachmentTooLarge(format!(
                    "exceeded {max_bytes}B cap"
                )));
            }
            out.extend_from_slice(&chunk);
        }

        Ok(out)
    }

    /// Slack's file hosts, plus the configured API host so a proxy or mock
    /// can serve files too.
    fn is_trusted_file_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };

        if parsed.scheme() == "https" && SLACK_FILE_HOSTS.contains(&host) {
            return true;
        }

        Url::parse(&self.api_base)
            .ok()
            .is_some_and(|api| api.host_str() == Some(host) && api.port() == parsed.port())
    }
}

async fn check_slack_response(method: &str, resp: reqwest::Response) -> Result<Value, BotError> {
    if !resp.status().is_success() {
        return Err(BotError::Slack(format!("{method} HTTP {}", resp.status())));
    }

    let body: Value = resp
        .json()
        .await
        .map_err(|e| BotError::Slack(format!("{method} JSON parse error: {e}")))?;

    if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        return Err(BotError::Slack(format!(
            "{method} error: {}",
            body.get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
        )));
    }

    Ok(body)
}

#[async_trait]
impl ChatPlatform for SlackClient {
    async fn send_text(&self, target: &ReplyTarget, text: &str) -> Result<(), BotError> {
        self.post_message(target, text).await
    }

    async fn send_file(
        &self,
        target: &ReplyTarget,
        filename: &str,
        contents: &[u8],
    ) -> Result<(), BotError> {
        self.upload_file(target, filename, contents).await
    }

    async fn fetch_attachment(
        &self,
        attachment: &Attachment,
        max_bytes: usize,
    ) -> Result<Vec<u8>, BotError> {
        if let Some(size) = attachment.size
            && size > u64::try_from(max_bytes).unwrap_or(u64::MAX)
        {
            return Err(BotError::AttachmentTooLarge(format!(
                "{} ({size}B > {max_bytes}B)",
                attachment.name
            )));
        }
        self.download_file(&attachment.url, max_bytes).await
    }
}
