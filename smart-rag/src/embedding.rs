//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::document::EmbeddingVector;
use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap specific embedding backends behind a unified async
/// interface. The default [`embed_texts`](EmbeddingProvider::embed_texts)
/// implementation calls [`embed_text`](EmbeddingProvider::embed_text)
/// sequentially; backends that support native batching should override it,
/// keeping `result[i]` aligned with `texts[i]`.
///
/// # Example
///
/// ```rust,ignore
/// use smart_rag::{EmbeddingProvider, HashingEmbeddingProvider};
///
/// let provider = HashingEmbeddingProvider::new(384);
/// let embedding = provider.embed_text("hello world").await?;
/// assert_eq!(embedding.dim(), 384);
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed_text(&self, text: &str) -> Result<EmbeddingVector>;

    /// Generate embedding vectors for a batch of text inputs, in input order.
    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed_text(text).await?);
        }
        Ok(results)
    }
}
