//! Handler for Slack Events API callbacks.
//!
//! Answers the `url_verification` handshake and turns command messages into
//! `CommandTask`s for the worker queue. Everything else is acknowledged and
//! dropped.

use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::helpers::{ok_empty, ok_text};
use super::parsing::{decode_slack_entities, v_array, v_str};
use super::sqs;
use crate::core::command::Command;
use crate::core::config::AppConfig;
use crate::core::models::{Attachment, CommandTask};

/// The only message subtype that still carries a user command.
const FILE_SHARE_SUBTYPE: &str = "file_share";

/// Build a `CommandTask` from a Slack `message` event.
///
/// Returns `None` for bot messages, edits and other system subtypes, and for
/// messages that are not commands.
#[must_use]
pub fn task_from_message_event(event: &Value) -> Option<CommandTask> {
    // Ignore bot messages (including our own replies) to avoid loops
    if event.get("bot_id").is_some() {
        return None;
    }
    if let Some(subtype) = v_str(event, &["subtype"])
        && subtype != FILE_SHARE_SUBTYPE
    {
        return None;
    }

    let channel_id = v_str(event, &["channel"]).filter(|c| !c.is_empty())?;
    let user_id = v_str(event, &["user"]).unwrap_or_default();
    let text = decode_slack_entities(v_str(event, &["text"]).unwrap_or_default());

    if Command::parse(&text).is_none() {
        debug!("Ignoring non-command message");
        return None;
    }

    let attachments = v_array(event, &["files"])
        .map(|files| files.iter().filter_map(attachment_from_file).collect())
        .unwrap_or_default();

    Some(CommandTask {
        correlation_id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        channel_id: channel_id.to_string(),
        thread_ts: v_str(event, &["thread_ts"]).map(ToString::to_string),
        text,
        attachments,
    })
}

fn attachment_from_file(file: &Value) -> Option<Attachment> {
    let id = v_str(file, &["id"])?;
    let url = v_str(file, &["url_private_download"]).or_else(|| v_str(file, &["url_private"]))?;
    let name = v_str(file, &["name"])
        .or_else(|| v_str(file, &["title"]))
        .unwrap_or_default();

    Some(Attachment {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        size: file.get("size").and_then(Value::as_u64),
    })
}

/// Handle an Events API payload (`url_verification` or `event_callback`).
///
/// Always acknowledges with 200 so Slack does not redeliver; enqueue failures
/// are logged.
pub async fn handle_event_callback(config: &AppConfig, json_body: &Value) -> Value {
    match v_str(json_body, &["type"]) {
        // URL verification handshake
        Some("url_verification") => {
            return ok_text(v_str(json_body, &["challenge"]).unwrap_or_default());
        }
        Some("event_callback") => {}
        _ => return ok_empty(),
    }

    let Some(event) = json_body.get("event") else {
        return ok_empty();
    };

    let event_type = v_str(event, &["type"]).unwrap_or_default();
    info!(event_type = %event_type, "Processing event callback");

    if event_type != "message" {
        return ok_empty();
    }

    let Some(task) = task_from_message_event(event) else {
        return ok_empty();
    };

    info!(
        correlation_id = %task.correlation_id,
        channel_id = %task.channel_id,
        attachment_count = task.attachments.len(),
        "Enqueueing command"
    );

    if let Err(e) = sqs::send_to_sqs(&task, config).await {
        error!(correlation_id = %task.correlation_id, "enqueue failed: {}", e);
    }

    ok_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(text: &str) -> Value {
        json!({
            "type": "message",
            "channel": "C123",
            "user": "U456",
            "text": text,
            "ts": "1700000000.000100"
        })
    }

    #[test]
    fn test_command_message_becomes_task() {
        let task = task_from_message_event(&message("$inspire")).unwrap();
        assert_eq!(task.channel_id, "C123");
        assert_eq!(task.user_id, "U456");
        assert_eq!(task.text, "$inspire");
        assert_eq!(task.thread_ts, None);
        assert!(task.attachments.is_empty());
        assert!(Uuid::parse_str(&task.correlation_id).is_ok());
    }

    #[test]
    fn test_threaded_message_keeps_thread() {
        let mut event = message("hello there");
        event["thread_ts"] = json!("1699999999.000001");
        let task = task_from_message_event(&event).unwrap();
        assert_eq!(task.thread_ts.as_deref(), Some("1699999999.000001"));
    }

    #[test]
    fn test_bot_and_system_messages_are_ignored() {
        let mut from_bot = message("hello");
        from_bot["bot_id"] = json!("B1");
        assert!(task_from_message_event(&from_bot).is_none());

        let mut edited = message("hello");
        edited["subtype"] = json!("message_changed");
        assert!(task_from_message_event(&edited).is_none());
    }

    #[test]
    fn test_chatter_is_ignored() {
        assert!(task_from_message_event(&message("good morning")).is_none());
        assert!(task_from_message_event(&message("")).is_none());
    }

    #[test]
    fn test_code_text_is_entity_decoded() {
        let task = task_from_message_event(&message("$code print(1 &lt; 2)")).unwrap();
        assert_eq!(task.text, "$code print(1 < 2)");
    }

    #[test]
    fn test_file_share_collects_attachments() {
        let mut event = message("$summarize");
        event["subtype"] = json!("file_share");
        event["files"] = json!([
            {
                "id": "F1",
                "name": "report.pdf",
                "size": 1234,
                "url_private": "https://files.slack.com/files-pri/T1-F1/report.pdf",
                "url_private_download": "https://files.slack.com/files-pri/T1-F1/download/report.pdf"
            },
            { "id": "F2", "name": "no-url.txt" }
        ]);

        let task = task_from_message_event(&event).unwrap();
        assert_eq!(
            task.attachments,
            vec![Attachment {
                id: "F1".to_string(),
                name: "report.pdf".to_string(),
                url: "https://files.slack.com/files-pri/T1-F1/download/report.pdf".to_string(),
                size: Some(1234),
            }]
        );
    }

    #[tokio::test]
    async fn test_url_verification_echoes_challenge() {
        let body = json!({"type": "url_verification", "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"});
        let resp = handle_event_callback(&AppConfig::default(), &body).await;
        assert_eq!(resp["statusCode"], 200);
        assert_eq!(
            resp["body"],
            "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
        );
    }

    #[tokio::test]
    async fn test_non_message_events_are_acknowledged() {
        let body = json!({
            "type": "event_callback",
            "event": {"type": "reaction_added", "user": "U1"}
        });
        let resp = handle_event_callback(&AppConfig::default(), &body).await;
        assert_eq!(resp, ok_empty());
    }
}
