//! In-memory vector store with distance-based search.
//!
//! This module provides [`InMemoryVectorStore`], a zero-dependency vector store
//! backed by a `BTreeMap` protected by a `tokio::sync::RwLock`. It is suitable
//! for development, testing, and small-scale use cases.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{DocumentChunk, EmbeddingVector, ScoredDocumentChunk};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

const BACKEND: &str = "InMemory";

/// Distance function used to rank records. Lower is always closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[default]
    SquaredL2,
    /// `1 - cosine_similarity`. Zero-magnitude vectors are at distance 1.
    Cosine,
    /// `1 - dot_product`.
    InnerProduct,
}

impl DistanceMetric {
    /// Distance between two vectors of equal length.
    pub fn distance(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::SquaredL2 => a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum(),
            Self::Cosine => {
                let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
                let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    return 1.0;
                }
                1.0 - dot / (norm_a * norm_b)
            }
            Self::InnerProduct => 1.0 - a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>(),
        }
    }
}

#[derive(Debug, Clone)]
struct Record {
    chunk: DocumentChunk,
    embedding: Vec<f32>,
}

#[derive(Debug, Default)]
struct Collection {
    /// Fixed by the first write; every later vector must match it.
    dimension: Option<usize>,
    records: BTreeMap<String, Record>,
}

impl Collection {
    fn check_dimension(&self, dimension: usize) -> Result<()> {
        if dimension == 0 {
            return Err(store_error("embedding must not be empty"));
        }
        match self.dimension {
            Some(expected) if expected != dimension => Err(store_error(format!(
                "embedding dimension {dimension} does not match collection dimension {expected}"
            ))),
            _ => Ok(()),
        }
    }
}

fn check_finite(embedding: &EmbeddingVector) -> Result<()> {
    if embedding.as_slice().iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(store_error("embedding contains a non-finite component"))
    }
}

/// An in-memory vector store bound to a single named collection.
///
/// The collection is created when the store is constructed. Records are keyed
/// by chunk id, so writing the same chunk again replaces the previous record.
///
/// # Example
///
/// ```rust,ignore
/// use smart_rag::{DistanceMetric, InMemoryVectorStore};
///
/// let store = InMemoryVectorStore::with_metric("docs", DistanceMetric::Cosine)?;
/// assert_eq!(store.count().await?, 0);
/// ```
#[derive(Debug)]
pub struct InMemoryVectorStore {
    collection_name: String,
    metric: DistanceMetric,
    collection: RwLock<Option<Collection>>,
}

impl InMemoryVectorStore {
    /// Create a store with the default [`DistanceMetric::SquaredL2`] metric.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if `collection_name` is blank.
    pub fn new(collection_name: impl Into<String>) -> Result<Self> {
        Self::with_metric(collection_name, DistanceMetric::default())
    }

    /// Create a store ranking records with `metric`.
    pub fn with_metric(collection_name: impl Into<String>, metric: DistanceMetric) -> Result<Self> {
        let collection_name = collection_name.into();
        if collection_name.trim().is_empty() {
            return Err(RagError::InvalidArgument("collection name must not be empty".into()));
        }
        debug!(collection = %collection_name, ?metric, "created in-memory collection");
        Ok(Self {
            collection_name,
            metric,
            collection: RwLock::new(Some(Collection::default())),
        })
    }

    /// Name of the backing collection.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Distance metric used by [`query`](VectorStore::query).
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of records currently stored.
    pub async fn count(&self) -> Result<usize> {
        let guard = self.collection.read().await;
        let collection = guard.as_ref().ok_or_else(|| self.not_initialized())?;
        Ok(collection.records.len())
    }

    /// Drop the backing collection. Every later operation fails with
    /// [`RagError::NotInitialized`].
    pub async fn drop_collection(&self) {
        self.collection.write().await.take();
        debug!(collection = %self.collection_name, "dropped in-memory collection");
    }

    fn not_initialized(&self) -> RagError {
        RagError::NotInitialized(format!(
            "collection '{}' is not initialized",
            self.collection_name
        ))
    }
}

fn store_error(message: impl Into<String>) -> RagError {
    RagError::VectorStoreError { backend: BACKEND.to_string(), message: message.into() }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[EmbeddingVector],
    ) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(RagError::InvalidArgument(format!(
                "chunks count ({}) must match embeddings count ({})",
                chunks.len(),
                embeddings.len()
            )));
        }
        if chunks.is_empty() {
            return Ok(());
        }

        let mut guard = self.collection.write().await;
        let collection = guard.as_mut().ok_or_else(|| self.not_initialized())?;

        // Validate the whole batch before touching any record.
        let dimension = collection.dimension.unwrap_or(embeddings[0].dim());
        for embedding in embeddings {
            collection.check_dimension(embedding.dim())?;
            check_finite(embedding)?;
            if embedding.dim() != dimension {
                return Err(store_error(format!(
                    "embedding dimension {} does not match batch dimension {dimension}",
                    embedding.dim()
                )));
            }
        }
        collection.dimension = Some(dimension);

        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            collection.records.insert(
                chunk.id.clone(),
                Record { chunk: chunk.clone(), embedding: embedding.vector.clone() },
            );
        }
        debug!(collection = %self.collection_name, chunk_count = chunks.len(), "upserted chunks");
        Ok(())
    }

    async fn query(
        &self,
        embedding: &EmbeddingVector,
        top_k: usize,
    ) -> Result<Vec<ScoredDocumentChunk>> {
        let guard = self.collection.read().await;
        let collection = guard.as_ref().ok_or_else(|| self.not_initialized())?;
        if collection.records.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        collection.check_dimension(embedding.dim())?;
        check_finite(embedding)?;

        let mut scored: Vec<ScoredDocumentChunk> = collection
            .records
            .values()
            .map(|record| ScoredDocumentChunk {
                chunk: record.chunk.clone(),
                score: self.metric.distance(&record.embedding, embedding.as_slice()),
            })
            .collect();

        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn delete_by_document_ids(&self, document_ids: &[&str]) -> Result<()> {
        let mut guard = self.collection.write().await;
        let collection = guard.as_mut().ok_or_else(|| self.not_initialized())?;
        if document_ids.is_empty() {
            return Ok(());
        }

        let targets: HashSet<&str> = document_ids.iter().copied().collect();
        let before = collection.records.len();
        collection.records.retain(|_, record| !targets.contains(record.chunk.document_id.as_str()));
        debug!(
            collection = %self.collection_name,
            removed = before - collection.records.len(),
            "deleted chunks by document id"
        );
        Ok(())
    }
}
