//! Document chunking policy.
//!
//! This module provides the [`Chunker`] trait and the [`WholeDocumentChunker`]
//! policy, which maps each document to exactly one chunk.

use crate::document::{Document, DocumentChunk};

/// A strategy for splitting documents into chunks.
///
/// Chunking must be pure: the same document always yields the same chunks,
/// in the same order, with the same ids.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks with indices starting at zero.
    fn chunk(&self, document: &Document) -> Vec<DocumentChunk>;
}

/// Emits the whole document as a single chunk with index `0`.
///
/// The chunk carries the full content and a copy of the document metadata,
/// and its id is `{document_id}::chunk:0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeDocumentChunker;

impl Chunker for WholeDocumentChunker {
    fn chunk(&self, document: &Document) -> Vec<DocumentChunk> {
        vec![DocumentChunk::new(
            document.id.clone(),
            0,
            document.content.clone(),
            document.metadata.clone(),
        )]
    }
}
