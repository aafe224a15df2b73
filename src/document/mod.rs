//! Attachment text extraction and fixed-size chunking.

pub mod chunker;
mod docx;
mod pdf;
mod txt;

pub use chunker::{DEFAULT_CHUNK_SIZE, chunk_text};

use crate::errors::BotError;

/// Attachment formats the summarizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Detect the format from a file name's final extension.
    ///
    /// The extension must be exactly `pdf`, `docx` or `txt`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::UnsupportedFormat` for any other extension, or for
    /// a name without one.
    pub fn from_filename(filename: &str) -> Result<Self, BotError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();

        match ext {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            other => Err(BotError::UnsupportedFormat(if other.is_empty() {
                filename.to_string()
            } else {
                format!(".{other}")
            })),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }
}

/// Uploaded bytes tagged with their declared format.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    #[must_use]
    pub fn new(format: DocumentFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// # Errors
    ///
    /// See [`DocumentFormat::from_filename`].
    pub fn from_upload(filename: &str, bytes: Vec<u8>) -> Result<Self, BotError> {
        Ok(Self::new(DocumentFormat::from_filename(filename)?, bytes))
    }
}

/// Extract the full text of a document in source order.
///
/// # Errors
///
/// - `BotError::Decoding` when a text file is not valid UTF-8.
/// - `BotError::Extraction` when a PDF or DOCX cannot be parsed.
pub fn extract_text(document: &RawDocument) -> Result<String, BotError> {
    match document.format {
        DocumentFormat::Pdf => pdf::extract_pdf(&document.bytes),
        DocumentFormat::Docx => docx::extract_docx(&document.bytes),
        DocumentFormat::Txt => txt::extract_txt(&document.bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename_accepts_supported_extensions() {
        assert_eq!(DocumentFormat::from_filename("report.pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_filename("notes.docx").unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_filename("a.b.txt").unwrap(), DocumentFormat::Txt);
    }

    #[test]
    fn test_from_filename_rejects_everything_else() {
        for name in ["data.csv", "old.doc", "README", "shout.PDF", "notes.txt.zip", "pdf"] {
            let err = DocumentFormat::from_filename(name).unwrap_err();
            assert!(
                matches!(err, BotError::UnsupportedFormat(_)),
                "expected rejection for {name}"
            );
        }
    }

    #[test]
    fn test_extract_text_dispatches_on_format() {
        let doc = RawDocument::new(DocumentFormat::Txt, b"plain words".to_vec());
        assert_eq!(extract_text(&doc).unwrap(), "plain words");

        let err = extract_text(&RawDocument::new(DocumentFormat::Pdf, b"not a pdf".to_vec()))
            .unwrap_err();
        assert!(matches!(err, BotError::Extraction(_)));

        let err = extract_text(&RawDocument::new(DocumentFormat::Docx, b"not a zip".to_vec()))
            .unwrap_err();
        assert!(matches!(err, BotError::Extraction(_)));
    }
}
