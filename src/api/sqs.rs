use aws_sdk_sqs::Client as SqsClient;
use tracing::info;

use crate::core::{config::AppConfig, models::CommandTask};
use crate::errors::BotError;

/// # Errors
///
/// Returns an error if the queue URL is not configured, serialization fails,
/// or the message cannot be sent to SQS.
pub async fn send_to_sqs(task: &CommandTask, config: &AppConfig) -> Result<(), BotError> {
    let queue_url = config.require_processing_queue_url()?;
    let shared_config = aws_config::from_env().load().await;
    let client = SqsClient::new(&shared_config);
    let message_body = serde_json::to_string(task)
        .map_err(|e| BotError::Parse(format!("Failed to serialize task: {e}")))?;

    client
        .send_message()
        .queue_url(queue_url)
        .message_body(message_body)
        .send()
        .await
        .map_err(|e| BotError::Aws(format!("Failed to send message to SQS: {e}")))?;

    info!(correlation_id = %task.correlation_id, "Enqueued command task");
    Ok(())
}
