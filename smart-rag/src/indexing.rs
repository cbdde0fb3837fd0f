//! Document indexing: chunk → embed → store.

use std::sync::Arc;

use tracing::{debug, info};

use crate::chunking::{Chunker, WholeDocumentChunker};
use crate::document::{Document, DocumentChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// Turns documents into stored, embedded chunks.
///
/// All chunks of one call are embedded in a single batch and written with a
/// single [`VectorStore::add_chunks`] call. Because chunk ids are
/// deterministic, a failed call can be retried in full without duplicates.
///
/// # Example
///
/// ```rust,ignore
/// let indexer = IndexingService::new(embedder.clone(), store.clone());
/// indexer.index_documents(&[Document::new("doc1", "apple banana apple")]).await?;
/// ```
pub struct IndexingService {
    embedder: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
}

impl IndexingService {
    /// Create a service using the [`WholeDocumentChunker`] policy.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, vector_store, chunker: Arc::new(WholeDocumentChunker) }
    }

    /// Replace the chunking policy.
    pub fn with_chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = chunker;
        self
    }

    /// Index `documents`, returning the number of chunks written.
    ///
    /// Empty input, or input producing no chunks, returns `0` without calling
    /// the embedder or the store.
    ///
    /// # Errors
    ///
    /// Embedding and store failures are returned unchanged. No claim is made
    /// about how many records were written before the failure.
    pub async fn index_documents(&self, documents: &[Document]) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let chunks: Vec<DocumentChunk> =
            documents.iter().flat_map(|document| self.chunker.chunk(document)).collect();
        if chunks.is_empty() {
            debug!(document_count = documents.len(), "documents produced no chunks");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedder.embed_texts(&texts).await?;
        self.vector_store.add_chunks(&chunks, &embeddings).await?;

        let chunk_count = chunks.len();
        info!(document_count = documents.len(), chunk_count, "indexed documents");
        Ok(chunk_count)
    }

    /// Remove every stored chunk of the given documents.
    pub async fn delete_documents(&self, document_ids: &[&str]) -> Result<()> {
        if document_ids.is_empty() {
            return Ok(());
        }
        self.vector_store.delete_by_document_ids(document_ids).await?;
        info!(document_count = document_ids.len(), "deleted documents");
        Ok(())
    }
}
