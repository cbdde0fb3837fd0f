//! Language model trait used for answer generation.

use async_trait::async_trait;

use crate::error::Result;

/// A text-completion backend.
///
/// Implementations know nothing about retrieval; they turn a finished prompt
/// into generated text. Every failure is reported as
/// [`RagError::GenerationError`](crate::RagError::GenerationError).
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
