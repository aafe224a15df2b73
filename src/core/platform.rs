use async_trait::async_trait;

use super::models::{Attachment, ReplyTarget};
use crate::errors::BotError;

/// The messaging platform as seen by the command router.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Post a plain-text message.
    async fn send_text(&self, target: &ReplyTarget, text: &str) -> Result<(), BotError>;

    /// Post `contents` as a file attachment named `filename`.
    async fn send_file(
        &self,
        target: &ReplyTarget,
        filename: &str,
        contents: &[u8],
    ) -> Result<(), BotError>;

    /// Download an inbound attachment, failing once more than `max_bytes` arrive.
    async fn fetch_attachment(
        &self,
        attachment: &Attachment,
        max_bytes: usize,
    ) -> Result<Vec<u8>, BotError>;
}
