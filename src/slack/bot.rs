use tracing::info;

use super::client::SlackClient;
use crate::ai::LlmClient;
use crate::core::config::AppConfig;
use crate::core::models::CommandTask;
use crate::errors::BotError;
use crate::quotes::QuoteClient;
use crate::worker::CommandRouter;

/// The production bot: Slack transport plus the generation and quote backends.
pub struct SlackBot {
    slack_client: SlackClient,
    llm_client: LlmClient,
    quote_client: QuoteClient,
}

impl SlackBot {
    /// Construct a `SlackBot` composed of a `SlackClient`, `LlmClient` and `QuoteClient`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Config` if the Slack bot token or the `OpenAI` API
    /// key is missing.
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        let slack_client = SlackClient::from_config(config)?;
        let llm_client = LlmClient::from_config(config)?;
        let quote_client = QuoteClient::from_config(config);

        Ok(Self {
            slack_client,
            llm_client,
            quote_client,
        })
    }

    /// Run one queued command end to end, replying in its channel.
    pub async fn handle_task(&self, config: &AppConfig, task: &CommandTask) {
        info!(
            correlation_id = %task.correlation_id,
            channel_id = %task.channel_id,
            "Handling command task"
        );
        CommandRouter::new(
            &self.slack_client,
            &self.llm_client,
            &self.quote_client,
            config,
        )
        .handle(task)
        .await;
    }
}
