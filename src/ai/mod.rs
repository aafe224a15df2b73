//! All AI/LLM functionality

pub mod client;

use async_trait::async_trait;

use crate::errors::BotError;

// Re-export main types for convenience
pub use client::{GenerationParams, LlmClient, estimate_tokens};

/// A text-completion backend: one prompt in, one completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns `BotError::Generation` when the backend fails or yields no text.
    async fn generate(&self, prompt: &str) -> Result<String, BotError>;
}
