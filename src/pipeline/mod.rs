//! Extract → chunk → summarize → dispatch.

pub mod aggregate;
pub mod dispatch;

pub use aggregate::{SUMMARY_SEPARATOR, summarize_chunks};
pub use dispatch::{Delivery, INLINE_MESSAGE_LIMIT, dispatch_output};

use tracing::info;

use crate::ai::TextGenerator;
use crate::document::chunk_text;
use crate::errors::BotError;

/// Summarize extracted document text chunk by chunk.
///
/// Returns an empty string, without calling the generator, when `text` is
/// empty.
///
/// # Errors
///
/// Propagates the first generation failure.
pub async fn summarize_text(
    generator: &dyn TextGenerator,
    text: &str,
    chunk_size: usize,
    concurrency: usize,
) -> Result<String, BotError> {
    let chunks = chunk_text(text, chunk_size);

    info!(
        text_chars = text.chars().count(),
        chunk_count = chunks.len(),
        concurrency,
        "Summarizing document"
    );

    summarize_chunks(generator, &chunks, concurrency).await
}
