use uuid::Uuid;

/// Longest reply, in characters, that is posted as a plain message.
pub const INLINE_MESSAGE_LIMIT: usize = 2000;

/// How a finished result reaches the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Inline(String),
    /// In-memory file with a name unique to this invocation.
    Attachment { filename: String, contents: String },
}

/// Choose inline delivery for text of at most `limit` characters and a file
/// attachment named `<stem>-<uuid>.txt` otherwise.
#[must_use]
pub fn dispatch_output(text: String, limit: usize, stem: &str) -> Delivery {
    if text.chars().count() <= limit {
        Delivery::Inline(text)
    } else {
        Delivery::Attachment {
            filename: format!("{stem}-{}.txt", Uuid::new_v4()),
            contents: text,
        }
    }
}
