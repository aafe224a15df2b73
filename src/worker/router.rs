use tracing::{debug, error, info, warn};

use super::deliver::deliver;
use super::summarize::summarize_attachment;
use super::{CODE_ACK_MESSAGE, CODE_OUTPUT_STEM, CODE_USAGE_MESSAGE, HELP_MESSAGE};
use crate::ai::TextGenerator;
use crate::core::command::Command;
use crate::core::config::AppConfig;
use crate::core::models::{CommandTask, ReplyTarget};
use crate::core::platform::ChatPlatform;
use crate::errors::BotError;
use crate::pipeline::dispatch_output;
use crate::prompt::code_explanation_prompt;
use crate::quotes::QuoteSource;

/// Routes one inbound message to its command and replies on the platform.
pub struct CommandRouter<'a> {
    platform: &'a dyn ChatPlatform,
    generator: &'a dyn TextGenerator,
    quotes: &'a dyn QuoteSource,
    config: &'a AppConfig,
}

impl<'a> CommandRouter<'a> {
    #[must_use]
    pub fn new(
        platform: &'a dyn ChatPlatform,
        generator: &'a dyn TextGenerator,
        quotes: &'a dyn QuoteSource,
        config: &'a AppConfig,
    ) -> Self {
        Self {
            platform,
            generator,
            quotes,
            config,
        }
    }

    /// Run the command in `task`, answering failures with the error's user
    /// message. A failure to post that reply is only logged.
    pub async fn handle(&self, task: &CommandTask) {
        let Err(e) = self.execute(task).await else {
            return;
        };

        error!(
            correlation_id = %task.correlation_id,
            error = %e,
            "Command failed"
        );

        let target = ReplyTarget::from(task);
        if let Err(post_err) = self.platform.send_text(&target, e.user_message()).await {
            warn!(
                correlation_id = %task.correlation_id,
                error = %post_err,
                "Failed to post failure message"
            );
        }
    }

    /// Run the command in `task`, returning the first error instead of
    /// reporting it.
    ///
    /// Messages that are not commands are ignored.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the command.
    pub async fn execute(&self, task: &CommandTask) -> Result<(), BotError> {
        let Some(command) = Command::parse(&task.text) else {
            debug!(correlation_id = %task.correlation_id, "Message is not a command");
            return Ok(());
        };

        info!(
            correlation_id = %task.correlation_id,
            command = command.name(),
            "Dispatching command"
        );

        let target = ReplyTarget::from(task);
        match command {
            Command::Hello => self.platform.send_text(&target, HELP_MESSAGE).await,
            Command::Inspire => {
                let quote = self.quotes.random_quote().await?;
                self.platform.send_text(&target, &quote.format()).await
            }
            Command::Code(snippet) => self.explain_code(&target, &snippet).await,
            Command::Summarize => {
                summarize_attachment(
                    self.platform,
                    self.generator,
                    self.config,
                    &target,
                    &task.attachments,
                )
                .await
            }
        }
    }

    async fn explain_code(&self, target: &ReplyTarget, snippet: &str) -> Result<(), BotError> {
        if snippet.is_empty() {
            return self.platform.send_text(target, CODE_USAGE_MESSAGE).await;
        }

        self.platform.send_text(target, CODE_ACK_MESSAGE).await?;

        let explanation = self
            .generator
            .generate(&code_explanation_prompt(snippet))
            .await?;

        deliver(
            self.platform,
            target,
            dispatch_output(
                explanation,
                self.config.inline_message_limit,
                CODE_OUTPUT_STEM,
            ),
        )
        .await
    }
}
