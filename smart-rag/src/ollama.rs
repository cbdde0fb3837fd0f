//! Ollama embedding and generation backends.
//!
//! This module is only available when the `ollama` feature is enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RagConfig;
use crate::document::EmbeddingVector;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::llm::LanguageModel;

const PROVIDER: &str = "Ollama";

/// The default local Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Upper bound for a single HTTP call to Ollama.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

// ── Embeddings ─────────────────────────────────────────────────────

/// An [`EmbeddingProvider`] backed by Ollama's `/api/embed` endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use smart_rag::ollama::OllamaEmbeddingProvider;
///
/// let provider = OllamaEmbeddingProvider::new("http://localhost:11434", "all-minilm")?;
/// let embedding = provider.embed_text("hello world").await?;
/// ```
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbeddingProvider {
    /// Create a provider for `model` served at `base_url`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = build_client().map_err(|e| embedding_error(format!("client setup failed: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), model: model.into() })
    }

    /// Create a provider for `config.embedding_model_name` served at `base_url`.
    pub fn from_config(base_url: impl Into<String>, config: &RagConfig) -> Result<Self> {
        Self::new(base_url, config.embedding_model_name.clone())
    }

    /// The model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

fn embedding_error(message: impl Into<String>) -> RagError {
    RagError::EmbeddingError { provider: PROVIDER.into(), message: message.into() }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed_text(&self, text: &str) -> Result<EmbeddingVector> {
        self.embed_texts(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| embedding_error("API returned empty response"))
    }

    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(provider = PROVIDER, batch_size = texts.len(), model = %self.model, "embedding batch");

        let response = self
            .client
            .post(endpoint(&self.base_url, "api/embed"))
            .json(&EmbedRequest { model: &self.model, input: texts })
            .send()
            .await
            .map_err(|e| embedding_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(embedding_error(format!("API returned {status}: {body}")));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| embedding_error(format!("failed to parse response: {e}")))?;
        if parsed.embeddings.len() != texts.len() {
            return Err(embedding_error(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }
        Ok(parsed.embeddings.into_iter().map(EmbeddingVector::new).collect())
    }
}

// ── Generation ─────────────────────────────────────────────────────

/// A [`LanguageModel`] backed by Ollama's `/api/generate` endpoint.
///
/// Requests are non-streaming and bounded by [`REQUEST_TIMEOUT`]. Connection
/// failures, HTTP errors, invalid JSON and a missing `response` field all
/// surface as [`RagError::GenerationError`].
pub struct OllamaLlm {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaLlm {
    /// Create a client for `model` served at `base_url`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client =
            build_client().map_err(|e| generation_error(format!("client setup failed: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), model: model.into() })
    }

    /// The model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

fn generation_error(message: impl Into<String>) -> RagError {
    RagError::GenerationError { provider: PROVIDER.into(), message: message.into() }
}

#[async_trait]
impl LanguageModel for OllamaLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = PROVIDER, model = %self.model, prompt_chars = prompt.len(), "generating");

        let response = self
            .client
            .post(endpoint(&self.base_url, "api/generate"))
            .json(&GenerateRequest { model: &self.model, prompt, stream: false })
            .send()
            .await
            .map_err(|e| generation_error(format!("connection error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(generation_error(format!("HTTP error: {status}")));
        }

        let body =
            response.text().await.map_err(|e| generation_error(format!("read failed: {e}")))?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| generation_error(format!("invalid JSON: {e}")))?;
        parsed
            .response
            .ok_or_else(|| generation_error("unexpected response: missing 'response' field"))
    }
}
