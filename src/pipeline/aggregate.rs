use futures::{StreamExt, TryStreamExt, stream};
use tracing::debug;

use crate::ai::TextGenerator;
use crate::errors::BotError;
use crate::prompt::summary_prompt;

/// Blank line placed between per-chunk summaries.
pub const SUMMARY_SEPARATOR: &str = "\n\n";

/// Summarize each chunk and join the results in chunk order.
///
/// At most `concurrency` requests are in flight at once; `1` reproduces a
/// strictly sequential run. The first failure aborts the whole aggregation and
/// no partial summary is returned.
///
/// # Errors
///
/// Returns the first error produced by `generator`.
pub async fn summarize_chunks(
    generator: &dyn TextGenerator,
    chunks: &[&str],
    concurrency: usize,
) -> Result<String, BotError> {
    if chunks.is_empty() {
        return Ok(String::new());
    }

    let summaries: Vec<String> = stream::iter(chunks.iter().enumerate())
        .map(|(index, chunk)| async move {
            debug!(chunk_index = index, chunk_chars = chunk.chars().count(), "Summarizing chunk");
            generator.generate(&summary_prompt(chunk)).await
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    Ok(summaries.join(SUMMARY_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Echoes a tag for each prompt; optionally fails on a given call number.
    struct ScriptedGenerator {
        prompts: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedGenerator {
        fn new(fail_on_call: Option<usize>) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_on_call,
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, BotError> {
            let call = {
                let mut prompts = self.prompts.lock().unwrap();
                prompts.push(prompt.to_string());
                prompts.len()
            };
            // Later calls finish first so ordering bugs show up under concurrency.
            let delay = 20u64.saturating_sub(call as u64 * 5);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if self.fail_on_call == Some(call) {
                return Err(BotError::Generation("backend down".to_string()));
            }
            Ok(format!("summary {call}"))
        }
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let generator = ScriptedGenerator::new(None);
        let summary = summarize_chunks(&generator, &[], 1).await.unwrap();
        assert_eq!(summary, "");
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn joins_in_chunk_order_with_blank_lines() {
        let generator = ScriptedGenerator::new(None);
        let summary = summarize_chunks(&generator, &["one", "two", "three"], 1)
            .await
            .unwrap();

        assert_eq!(summary, "summary 1\n\nsummary 2\n\nsummary 3");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("```one```"));
        assert!(prompts[2].contains("```three```"));
    }

    #[tokio::test]
    async fn concurrent_run_preserves_order() {
        let generator = ScriptedGenerator::new(None);
        let summary = summarize_chunks(&generator, &["a", "b", "c"], 3).await.unwrap();
        assert_eq!(summary, "summary 1\n\nsummary 2\n\nsummary 3");
    }

    #[tokio::test]
    async fn any_failure_fails_the_whole_aggregation() {
        let generator = ScriptedGenerator::new(Some(2));
        let err = summarize_chunks(&generator, &["a", "b", "c"], 1).await.unwrap_err();
        assert!(matches!(err, BotError::Generation(_)));
        // Sequential mode stops at the failing chunk.
        assert_eq!(generator.prompts().len(), 2);
    }
}
