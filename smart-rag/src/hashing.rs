//! Offline feature-hashing embedding provider.
//!
//! [`HashingEmbeddingProvider`] maps lowercase word tokens into a fixed number
//! of buckets using SHA-256, producing deterministic L2-normalized vectors.
//! Texts sharing words land close together, which is enough for development,
//! tests, and demos without a model download or API key.

use async_trait::async_trait;
use regex::Regex;
use sha2::{Digest, Sha256};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::document::EmbeddingVector;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

const PROVIDER: &str = "Hashing";

/// Dimensionality matching `all-MiniLM-L6-v2`, the default model of the service.
pub const DEFAULT_DIMENSIONS: usize = 384;

#[derive(Debug)]
struct HashingModel {
    tokenizer: Regex,
    dimensions: usize,
}

impl HashingModel {
    fn load(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(RagError::EmbeddingError {
                provider: PROVIDER.into(),
                message: "dimensions must be greater than zero".into(),
            });
        }
        let tokenizer = Regex::new(r"\w+").map_err(|e| RagError::EmbeddingError {
            provider: PROVIDER.into(),
            message: format!("failed to build tokenizer: {e}"),
        })?;
        debug!(provider = PROVIDER, dimensions, "loaded embedding model");
        Ok(Self { tokenizer, dimensions })
    }

    fn encode(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0f32; self.dimensions];
        let lowered = text.to_lowercase();
        for token in self.tokenizer.find_iter(&lowered) {
            let digest = Sha256::digest(token.as_str().as_bytes());
            let hash = digest[..8].iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        EmbeddingVector::new(vector)
    }
}

/// A deterministic [`EmbeddingProvider`] based on the hashing trick.
///
/// The tokenizer is built on first use and reused for the lifetime of the
/// provider; concurrent first calls initialize it exactly once.
///
/// # Example
///
/// ```rust,ignore
/// use smart_rag::HashingEmbeddingProvider;
///
/// let provider = HashingEmbeddingProvider::new(64);
/// assert!(!provider.is_loaded());
/// let v = provider.embed_text("apple banana").await?;
/// assert!(provider.is_loaded());
/// ```
#[derive(Debug)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
    model: OnceCell<HashingModel>,
}

impl HashingEmbeddingProvider {
    /// Create a provider producing vectors of `dimensions` components.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, model: OnceCell::new() }
    }

    /// Dimensionality of produced vectors.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Whether the model has been initialized by a previous call.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    async fn model(&self) -> Result<&HashingModel> {
        self.model.get_or_try_init(|| async { HashingModel::load(self.dimensions) }).await
    }
}

impl Default for HashingEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed_text(&self, text: &str) -> Result<EmbeddingVector> {
        Ok(self.model().await?.encode(text))
    }

    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>> {
        let model = self.model().await?;
        debug!(provider = PROVIDER, batch_size = texts.len(), "embedding batch");
        Ok(texts.iter().map(|text| model.encode(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory::DistanceMetric;

    #[tokio::test]
    async fn model_loads_lazily_once() {
        let provider = HashingEmbeddingProvider::new(32);
        assert!(!provider.is_loaded());
        provider.embed_text("hello").await.unwrap();
        assert!(provider.is_loaded());
        let first = provider.model().await.unwrap() as *const HashingModel;
        provider.embed_texts(&["again"]).await.unwrap();
        let second = provider.model().await.unwrap() as *const HashingModel;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn vectors_are_deterministic_and_normalized() {
        let provider = HashingEmbeddingProvider::new(64);
        let a = provider.embed_text("Welding CNC").await.unwrap();
        let b = provider.embed_text("welding cnc").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dim(), 64);
        let norm: f32 = a.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn empty_text_embeds_to_zero_vector() {
        let provider = HashingEmbeddingProvider::new(8);
        let v = provider.embed_text("").await.unwrap();
        assert_eq!(v.vector, vec![0.0; 8]);
    }

    #[tokio::test]
    async fn batch_matches_single_calls() {
        let provider = HashingEmbeddingProvider::default();
        let texts = ["apple banana apple", "welding cnc trumatic", ""];
        let batch = provider.embed_texts(&texts).await.unwrap();
        assert_eq!(batch.len(), texts.len());
        for (text, vector) in texts.iter().zip(&batch) {
            assert_eq!(&provider.embed_text(text).await.unwrap(), vector);
        }
    }

    #[tokio::test]
    async fn shared_words_are_closer() {
        let provider = HashingEmbeddingProvider::default();
        let query = provider.embed_text("apple").await.unwrap();
        let fruit = provider.embed_text("apple banana apple").await.unwrap();
        let metal = provider.embed_text("welding cnc trumatic").await.unwrap();
        let metric = DistanceMetric::SquaredL2;
        assert!(
            metric.distance(query.as_slice(), fruit.as_slice())
                < metric.distance(query.as_slice(), metal.as_slice())
        );
    }

    #[tokio::test]
    async fn zero_dimensions_fail_on_first_use() {
        let provider = HashingEmbeddingProvider::new(0);
        let err = provider.embed_text("x").await.unwrap_err();
        assert!(err.is_backend());
        assert!(!provider.is_loaded());
    }
}
