use tracing::info;

use crate::core::models::ReplyTarget;
use crate::core::platform::ChatPlatform;
use crate::errors::BotError;
use crate::pipeline::Delivery;

/// Post a finished result either inline or as an uploaded text file.
///
/// # Errors
///
/// Returns an error if the platform rejects the message or upload.
pub async fn deliver(
    platform: &dyn ChatPlatform,
    target: &ReplyTarget,
    delivery: Delivery,
) -> Result<(), BotError> {
    match delivery {
        Delivery::Inline(text) => {
            info!(chars = text.chars().count(), "Delivering result inline");
            platform.send_text(target, &text).await
        }
        Delivery::Attachment { filename, contents } => {
            info!(
                filename = %filename,
                bytes = contents.len(),
                "Delivering result as attachment"
            );
            platform
                .send_file(target, &filename, contents.as_bytes())
                .await
        }
    }
}
