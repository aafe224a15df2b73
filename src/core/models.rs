use serde::{Deserialize, Serialize};

/// One inbound command, queued by the API Lambda and consumed by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTask {
    pub correlation_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub thread_ts: Option<String>,
    /// Message text with Slack's HTML entities already decoded.
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// A file shared alongside a command message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub size: Option<u64>,
}

/// Where replies for a task are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub channel_id: String,
    pub thread_ts: Option<String>,
}

impl From<&CommandTask> for ReplyTarget {
    fn from(task: &CommandTask) -> Self {
        Self {
            channel_id: task.channel_id.clone(),
            thread_ts: task.thread_ts.clone(),
        }
    }
}
