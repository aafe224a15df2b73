/// Instructions for the `$code` command. The snippet is appended verbatim
/// between triple backticks.
pub const CODE_EXPLAIN_INSTRUCTIONS: &str = "Your task is to act as a Python code explainer.\n\
I'll give you a code snippet.\n\
Your job is to explain the code step-by-step.\n\
Also, compute the final output of the code.\n\
The code snippet is shared below, delimited with triple backticks:";

pub const CODE_EXPLAIN_CLOSING: &str =
    "Finally, provide a summary that clearly states the main logic or purpose of the code.";

pub const SUMMARY_INSTRUCTIONS: &str = "Your task is to summarize the following text. \
Keep the summary concise and capture the key points:";

/// Build the explain prompt around a user-supplied snippet.
#[must_use]
pub fn code_explanation_prompt(snippet: &str) -> String {
    format!("{CODE_EXPLAIN_INSTRUCTIONS}\n```{snippet}```\n{CODE_EXPLAIN_CLOSING}")
}

/// Build the summary prompt for one chunk of document text.
#[must_use]
pub fn summary_prompt(chunk: &str) -> String {
    format!("{SUMMARY_INSTRUCTIONS}\n```{chunk}```")
}
