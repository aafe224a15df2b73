use tracing::info;

use super::deliver::deliver;
use super::{NO_TEXT_MESSAGE, SUMMARIZE_ACK_MESSAGE, SUMMARIZE_USAGE_MESSAGE, SUMMARY_OUTPUT_STEM};
use crate::ai::TextGenerator;
use crate::core::config::AppConfig;
use crate::core::models::{Attachment, ReplyTarget};
use crate::core::platform::ChatPlatform;
use crate::document::{DocumentFormat, RawDocument, extract_text};
use crate::errors::BotError;
use crate::pipeline::{dispatch_output, summarize_text};

/// Summarize the first attachment of a `$summarize` message.
///
/// The extension is checked before anything is downloaded, so an unsupported
/// file costs neither a download nor a generation call.
///
/// # Errors
///
/// Returns `BotError::UnsupportedFormat` for unknown extensions and propagates
/// download, extraction, generation and delivery failures.
pub async fn summarize_attachment(
    platform: &dyn ChatPlatform,
    generator: &dyn TextGenerator,
    config: &AppConfig,
    target: &ReplyTarget,
    attachments: &[Attachment],
) -> Result<(), BotError> {
    let Some(attachment) = attachments.first() else {
        return platform.send_text(target, SUMMARIZE_USAGE_MESSAGE).await;
    };

    let format = DocumentFormat::from_filename(&attachment.name)?;
    let bytes = platform
        .fetch_attachment(attachment, config.max_attachment_bytes)
        .await?;

    info!(
        file_id = %attachment.id,
        format = format.extension(),
        bytes = bytes.len(),
        "Attachment downloaded"
    );

    let text = extract_text(&RawDocument::new(format, bytes))?;
    if text.trim().is_empty() {
        return platform.send_text(target, NO_TEXT_MESSAGE).await;
    }

    platform.send_text(target, SUMMARIZE_ACK_MESSAGE).await?;

    let summary = summarize_text(
        generator,
        &text,
        config.chunk_size,
        config.summary_concurrency,
    )
    .await?;

    deliver(
        platform,
        target,
        dispatch_output(summary, config.inline_message_limit, SUMMARY_OUTPUT_STEM),
    )
    .await
}
