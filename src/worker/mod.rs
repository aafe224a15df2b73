//! Worker Lambda handler and command processing

pub mod deliver;
pub mod handler;
pub mod router;
pub mod summarize;

// Re-export the main handler for convenience
pub use handler::handler;
pub use router::CommandRouter;

/// Canonical failure message shown to users when a command fails.
pub const CANONICAL_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't complete that request at this time. Please try again later.";

/// Reply to an attachment whose extension is not `.pdf`, `.docx` or `.txt`.
pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Unsupported file type. Please upload a PDF, Word document, or text file.";

/// Reply to an attachment over the configured size cap.
pub const FILE_TOO_LARGE_MESSAGE: &str =
    "That file is too large for me to process. Please upload a smaller document.";

/// Reply to a document that yields no text.
pub const NO_TEXT_MESSAGE: &str = "The document does not contain any text to summarize.";

pub const CODE_ACK_MESSAGE: &str = "Code has been successfully extracted.";

pub const SUMMARIZE_ACK_MESSAGE: &str =
    "File has been successfully processed. Summarizing the content now...";

pub const CODE_USAGE_MESSAGE: &str =
    "Please include a code snippet after `$code`, for example: `$code print(1+1)`.";

pub const SUMMARIZE_USAGE_MESSAGE: &str =
    "Please attach a PDF, Word document, or text file to your `$summarize` message.";

pub const HELP_MESSAGE: &str = "Hello! I am a bot. You can ask me anything such as:\n\n\
1. To explain Python code, just type \"$code\" followed by your code.\n\
2. To get an inspiring quote, just type \"$inspire\".\n\
3. To summarize a document, type \"$summarize\" and attach a PDF, Word document, or text file.";

/// File name stem for long `$code` explanations.
pub const CODE_OUTPUT_STEM: &str = "output";

/// File name stem for long `$summarize` results.
pub const SUMMARY_OUTPUT_STEM: &str = "summary_output";
