use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode text: {0}")]
    Decoding(String),

    #[error("Attachment too large: {0}")]
    AttachmentTooLarge(String),

    #[error("Failed to extract document text: {0}")]
    Extraction(String),

    #[error("Failed to generate text: {0}")]
    Generation(String),

    #[error("Failed to reach quote service: {0}")]
    Network(String),

    #[error("Failed to access Slack API: {0}")]
    Slack(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Failed to interact with AWS services: {0}")]
    Aws(String),

    #[error("Failed to parse Slack event: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BotError {
    /// Plain chat message shown to the user when a command aborts with this error.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::UnsupportedFormat(_) => crate::worker::UNSUPPORTED_FILE_MESSAGE,
            BotError::Decoding(_) => {
                "That file is not valid UTF-8 text, so I couldn't read it. Please check the encoding and try again."
            }
            BotError::AttachmentTooLarge(_) => crate::worker::FILE_TOO_LARGE_MESSAGE,
            BotError::Extraction(_) => {
                "I couldn't read that document. It may be corrupted or password protected."
            }
            BotError::Network(_) => "I couldn't fetch a quote right now. Please try again later.",
            _ => crate::worker::CANONICAL_FAILURE_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::Http(error.to_string())
    }
}

impl From<std::string::FromUtf8Error> for BotError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        BotError::Decoding(error.to_string())
    }
}

// Generic implementation for AWS SDK errors
impl<E> From<aws_sdk_sqs::error::SdkError<E>> for BotError
where
    E: std::fmt::Display,
{
    fn from(error: aws_sdk_sqs::error::SdkError<E>) -> Self {
        BotError::Aws(error.to_string())
    }
}
