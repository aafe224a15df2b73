use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};

use crate::core::config::AppConfig;
use crate::core::models::CommandTask;
use crate::slack::SlackBot;

/// Pull every queued `CommandTask` out of an SQS event payload.
///
/// # Errors
///
/// Returns an error if the payload has no records, a record has no string
/// `body`, or a body is not a `CommandTask`.
pub fn parse_sqs_tasks(payload: &Value) -> Result<Vec<CommandTask>, Error> {
    let records = payload
        .get("Records")
        .and_then(|records| records.as_array())
        .filter(|records| !records.is_empty())
        .ok_or_else(|| Error::from("SQS event contains no records"))?;

    records
        .iter()
        .map(|record| {
            record
                .get("body")
                .and_then(|body| body.as_str())
                .ok_or_else(|| Error::from("Failed to extract SQS message body"))
                .and_then(|body_str| {
                    serde_json::from_str::<CommandTask>(body_str).map_err(|e| {
                        Error::from(format!(
                            "Failed to parse SQS message body into CommandTask: {e}"
                        ))
                    })
                })
        })
        .collect()
}

/// Lambda handler for the Worker entrypoint. Parses SQS messages and runs each command.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the event cannot be parsed,
/// or the bot cannot be constructed. Command failures are reported to the
/// user in chat and do not fail the invocation.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<(), Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let tasks = parse_sqs_tasks(&event.payload)?;
    info!(task_count = tasks.len(), "Worker Lambda received SQS event");

    let bot = SlackBot::new(&config).map_err(|e| {
        error!("Failed to initialize bot: {}", e);
        Error::from(format!("Failed to initialize bot: {e}"))
    })?;

    for task in &tasks {
        let span = info_span!("command", correlation_id = %task.correlation_id);
        bot.handle_task(&config, task).instrument(span).await;
    }

    Ok(())
}

pub use self::function_handler as handler;
