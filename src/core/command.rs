//! Command grammar: case-insensitive prefixes on the message text.

pub const HELLO_PREFIX: &str = "hello";
pub const INSPIRE_PREFIX: &str = "$inspire";
pub const CODE_PREFIX: &str = "$code";
pub const SUMMARIZE_PREFIX: &str = "$summarize";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Inspire,
    /// Snippet following `$code`, trimmed but otherwise verbatim.
    Code(String),
    Summarize,
}

impl Command {
    /// Match `text` against the known command prefixes.
    ///
    /// Returns `None` for ordinary chatter so callers can ignore it.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();

        if starts_with_ignore_case(text, HELLO_PREFIX) {
            Some(Command::Hello)
        } else if starts_with_ignore_case(text, INSPIRE_PREFIX) {
            Some(Command::Inspire)
        } else if starts_with_ignore_case(text, CODE_PREFIX) {
            Some(Command::Code(text[CODE_PREFIX.len()..].trim().to_string()))
        } else if starts_with_ignore_case(text, SUMMARIZE_PREFIX) {
            Some(Command::Summarize)
        } else {
            None
        }
    }

    /// Short name used in log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Hello => "hello",
            Command::Inspire => "inspire",
            Command::Code(_) => "code",
            Command::Summarize => "summarize",
        }
    }
}

// Prefixes are ASCII, so a byte-length slice that passes `get` is a char boundary.
fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
