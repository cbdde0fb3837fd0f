//! Query execution: embed → search → sort → assemble context.

use std::sync::Arc;

use tracing::info;

use crate::context::{ContextBuilder, DEFAULT_MAX_CHARS};
use crate::document::ScoredDocumentChunk;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Default number of chunks returned by a query.
pub const DEFAULT_TOP_K: usize = 5;

/// Retrieves ranked chunks for a query and assembles them into context.
///
/// # Example
///
/// ```rust,ignore
/// let retrieval = RetrievalService::new(embedder, store);
/// let (results, context) = retrieval.retrieve_with_context("apple", 2, 8000).await?;
/// ```
pub struct RetrievalService {
    embedder: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    context_builder: ContextBuilder,
}

impl RetrievalService {
    /// Create a retrieval service over the given embedder and store.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, vector_store, context_builder: ContextBuilder }
    }

    /// Return up to `top_k` chunks ordered by ascending distance.
    ///
    /// Results from the store are re-sorted here; equal scores keep the
    /// store's order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if `query_text` is blank or
    /// `top_k` is zero, before any embedding or store call.
    pub async fn retrieve(
        &self,
        query_text: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocumentChunk>> {
        if query_text.trim().is_empty() {
            return Err(RagError::InvalidArgument("query text cannot be empty".into()));
        }
        if top_k == 0 {
            return Err(RagError::InvalidArgument("top_k must be greater than 0".into()));
        }

        let embedding = self.embedder.embed_text(query_text).await?;
        let mut results = self.vector_store.query(&embedding, top_k).await?;
        results.sort_by(|a, b| a.score.total_cmp(&b.score));

        info!(top_k, result_count = results.len(), "retrieved chunks");
        Ok(results)
    }

    /// Like [`retrieve`](Self::retrieve), also returning the context string
    /// built from the results under `max_chars`.
    pub async fn retrieve_with_context(
        &self,
        query_text: &str,
        top_k: usize,
        max_chars: usize,
    ) -> Result<(Vec<ScoredDocumentChunk>, String)> {
        let results = self.retrieve(query_text, top_k).await?;
        let context = self.context_builder.build(&results, max_chars);
        info!(context_chars = context.chars().count(), max_chars, "assembled context");
        Ok((results, context))
    }

    /// [`retrieve_with_context`](Self::retrieve_with_context) with the default
    /// `top_k` and character budget.
    pub async fn retrieve_with_default_context(
        &self,
        query_text: &str,
    ) -> Result<(Vec<ScoredDocumentChunk>, String)> {
        self.retrieve_with_context(query_text, DEFAULT_TOP_K, DEFAULT_MAX_CHARS).await
    }
}
