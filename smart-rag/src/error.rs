//! Error types for the `smart-rag` crate.

use thiserror::Error;

/// Errors that can occur in RAG operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// The caller passed an invalid argument (empty query, zero `top_k`,
    /// mismatched chunk and embedding counts). Raised before any I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing collection of a vector store is not established.
    #[error("Not initialized: {0}")]
    NotInitialized(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The language model failed to produce a completion.
    ///
    /// Transport, status and decoding failures all collapse into this variant.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The language model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RagError {
    /// Returns `true` for failures raised by the embedding or vector store backend.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::EmbeddingError { .. } | Self::VectorStoreError { .. })
    }
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
