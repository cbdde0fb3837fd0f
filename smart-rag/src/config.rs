//! Configuration for indexing and retrieval.

use serde::{Deserialize, Serialize};

use crate::context::DEFAULT_MAX_CHARS;
use crate::error::{RagError, Result};
use crate::hashing::DEFAULT_DIMENSIONS;
use crate::retrieval::DEFAULT_TOP_K;

/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Configuration parameters for the RAG services.
///
/// Constructed explicitly and handed to the components that need it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RagConfig {
    /// Name of the vector store collection.
    pub collection_name: String,
    /// Number of chunks retrieved per query.
    pub default_top_k: usize,
    /// Character budget of the assembled context.
    pub max_context_chars: usize,
    /// Embedding model identifier, used by `OllamaEmbeddingProvider::from_config`.
    /// The offline hashing embedder ignores it.
    pub embedding_model_name: String,
    /// Dimensionality of the embedding model.
    pub embedding_dimensions: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            collection_name: "default".to_string(),
            default_top_k: DEFAULT_TOP_K,
            max_context_chars: DEFAULT_MAX_CHARS,
            embedding_model_name: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Check that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `collection_name` is blank
    /// - `default_top_k == 0`
    /// - `embedding_dimensions == 0`
    pub fn validate(&self) -> Result<()> {
        if self.collection_name.trim().is_empty() {
            return Err(RagError::ConfigError("collection_name must not be empty".to_string()));
        }
        if self.default_top_k == 0 {
            return Err(RagError::ConfigError(
                "default_top_k must be greater than zero".to_string(),
            ));
        }
        if self.embedding_dimensions == 0 {
            return Err(RagError::ConfigError(
                "embedding_dimensions must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the collection name.
    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.config.collection_name = name.into();
        self
    }

    /// Set the number of chunks retrieved per query.
    pub fn default_top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Set the context character budget.
    pub fn max_context_chars(mut self, max_chars: usize) -> Self {
        self.config.max_context_chars = max_chars;
        self
    }

    /// Set the embedding model identifier.
    pub fn embedding_model_name(mut self, name: impl Into<String>) -> Self {
        self.config.embedding_model_name = name.into();
        self
    }

    /// Set the embedding dimensionality.
    pub fn embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.config.embedding_dimensions = dimensions;
        self
    }

    /// Build the [`RagConfig`], see [`RagConfig::validate`].
    pub fn build(self) -> Result<RagConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
