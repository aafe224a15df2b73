use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

use crate::errors::BotError;

/// Extract the text of every page, in document order.
///
/// Pages are concatenated as `pdf-extract` emits them, with nothing inserted
/// between one page and the next.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, BotError> {
    // pdf-extract panics on some malformed inputs; contain it to this command.
    catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| {
            warn!("PDF parser panicked on a {} byte document", bytes.len());
            BotError::Extraction("PDF parser failed on malformed input".to_string())
        })?
        .map_err(|e| BotError::Extraction(format!("PDF: {e}")))
}
