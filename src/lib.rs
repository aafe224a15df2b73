/// Scribe - a Slack bot that explains code, shares quotes and summarizes documents.
///
/// This crate implements a two-Lambda architecture:
/// 1. An API Lambda that receives and verifies Slack Events API callbacks, then queues commands
/// 2. A Worker Lambda that runs queued commands and replies in the originating channel
///
/// # Commands
///
/// - `hello` prints a help message
/// - `$inspire` posts a random quote
/// - `$code <snippet>` explains a code snippet step by step
/// - `$summarize` with a PDF, Word or text attachment summarizes the document
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - SQS for task queuing between Lambdas
/// - slack-morphism types for Slack API requests
/// - an `OpenAI`-compatible Responses API for text generation
/// - pdf-extract and docx-rs for document text
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use scribe::core::config::AppConfig;
/// use scribe::core::models::CommandTask;
/// use scribe::slack::SlackBot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     scribe::setup_logging();
///
///     let config = AppConfig {
///         slack_bot_token: Some("xoxb-dummy".to_string()),
///         openai_api_key: Some("sk-dummy".to_string()),
///         ..AppConfig::default()
///     };
///
///     let bot = SlackBot::new(&config)?;
///     let task = CommandTask {
///         correlation_id: "demo".into(),
///         user_id: "U123".into(),
///         channel_id: "C12345678".into(),
///         thread_ts: None,
///         text: "$code print(1+1)".into(),
///         attachments: Vec::new(),
///     };
///     bot.handle_task(&config, &task).await;
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod document;
pub mod errors;
pub mod pipeline;
pub mod prompt;
pub mod quotes;
pub mod slack;
pub mod worker;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called at the start of each Lambda
/// binary. Calling it again is a no-op.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// scribe::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
