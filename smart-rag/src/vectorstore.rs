//! Vector store trait for storing and searching vector embeddings.

use async_trait::async_trait;

use crate::document::{DocumentChunk, EmbeddingVector, ScoredDocumentChunk};
use crate::error::Result;

/// A storage backend for chunk embeddings with nearest-neighbour search.
///
/// A store instance is bound to one backing collection, established when the
/// store is constructed. Writes are upserts keyed by chunk id.
///
/// # Example
///
/// ```rust,ignore
/// use smart_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new("docs")?;
/// store.add_chunks(&chunks, &embeddings).await?;
/// let results = store.query(&query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upsert `chunks[i]` with `embeddings[i]`.
    ///
    /// Fails with [`RagError::InvalidArgument`](crate::RagError::InvalidArgument)
    /// when the two slices differ in length. Empty input is a no-op.
    async fn add_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[EmbeddingVector],
    ) -> Result<()>;

    /// Return up to `top_k` records nearest to `embedding`.
    ///
    /// Results are ordered by ascending distance (lower is closer).
    async fn query(
        &self,
        embedding: &EmbeddingVector,
        top_k: usize,
    ) -> Result<Vec<ScoredDocumentChunk>>;

    /// Remove every chunk whose `document_id` is in `document_ids`.
    async fn delete_by_document_ids(&self, document_ids: &[&str]) -> Result<()>;
}
