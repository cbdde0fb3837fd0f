//! Retrieval-augmented generation core.
//!
//! This crate provides:
//! - Document, chunk, embedding and search result types
//! - [`EmbeddingProvider`] and [`VectorStore`] traits with in-process implementations
//! - [`IndexingService`] (chunk → embed → store) and [`RetrievalService`]
//!   (embed → search → sort → bounded context)
//! - [`RagOrchestrator`], which feeds retrieved context to a [`LanguageModel`]
//!
//! Network backends are feature-gated: enable `ollama` for the Ollama
//! embedding and generation clients.

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod hashing;
pub mod indexing;
pub mod inmemory;
pub mod llm;
#[cfg(feature = "ollama")]
pub mod ollama;
pub mod orchestrator;
pub mod prompt;
pub mod retrieval;
pub mod vectorstore;

pub use chunking::{Chunker, WholeDocumentChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::{ContextBuilder, SEPARATOR};
pub use document::{
    Document, DocumentChunk, EmbeddingVector, Metadata, MetadataValue, ScoredDocumentChunk,
};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use hashing::HashingEmbeddingProvider;
pub use indexing::IndexingService;
pub use inmemory::{DistanceMetric, InMemoryVectorStore};
pub use llm::LanguageModel;
pub use orchestrator::RagOrchestrator;
pub use prompt::PromptBuilder;
pub use retrieval::{DEFAULT_TOP_K, RetrievalService};
pub use vectorstore::VectorStore;
