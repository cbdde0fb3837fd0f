//! RAG orchestrator: retrieval → prompt → generation.

use std::sync::Arc;

use tracing::info;

use crate::config::RagConfig;
use crate::context::DEFAULT_MAX_CHARS;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::prompt::PromptBuilder;
use crate::retrieval::{DEFAULT_TOP_K, RetrievalService};

/// Answers questions from retrieved context.
///
/// No retry or caching: a retrieval or generation failure is returned to the
/// caller as-is.
///
/// # Example
///
/// ```rust,ignore
/// let orchestrator = RagOrchestrator::new(Arc::new(retrieval), Arc::new(llm));
/// let answer = orchestrator.answer("What is welded?").await?;
/// ```
pub struct RagOrchestrator {
    retrieval: Arc<RetrievalService>,
    llm: Arc<dyn LanguageModel>,
    top_k: usize,
    max_context_chars: usize,
}

impl RagOrchestrator {
    /// Create an orchestrator with the default `top_k` and context budget.
    pub fn new(retrieval: Arc<RetrievalService>, llm: Arc<dyn LanguageModel>) -> Self {
        Self { retrieval, llm, top_k: DEFAULT_TOP_K, max_context_chars: DEFAULT_MAX_CHARS }
    }

    /// Take `top_k` and the context budget from `config`.
    pub fn with_config(mut self, config: &RagConfig) -> Self {
        self.top_k = config.default_top_k;
        self.max_context_chars = config.max_context_chars;
        self
    }

    /// Answer `query`, returning the model output verbatim.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let (results, context) = self
            .retrieval
            .retrieve_with_context(query, self.top_k, self.max_context_chars)
            .await?;
        let prompt = PromptBuilder::build(&context, query);
        let answer = self.llm.generate(&prompt).await?;
        info!(source_count = results.len(), answer_chars = answer.chars().count(), "answered query");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::document::Document;
    use crate::error::RagError;
    use crate::hashing::HashingEmbeddingProvider;
    use crate::indexing::IndexingService;
    use crate::inmemory::InMemoryVectorStore;

    /// Echoes a fixed answer and remembers the prompt it received.
    #[derive(Default)]
    struct FakeLlm {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for FakeLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("This is a test answer.".to_string())
        }
    }

    struct DownLlm;

    #[async_trait]
    impl LanguageModel for DownLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(RagError::GenerationError { provider: "test".into(), message: "refused".into() })
        }
    }

    async fn retrieval_over(docs: &[Document]) -> Arc<RetrievalService> {
        let embedder = Arc::new(HashingEmbeddingProvider::default());
        let store = Arc::new(InMemoryVectorStore::new("orchestrator").unwrap());
        IndexingService::new(embedder.clone(), store.clone()).index_documents(docs).await.unwrap();
        Arc::new(RetrievalService::new(embedder, store))
    }

    #[tokio::test]
    async fn answer_is_model_output_verbatim() {
        let retrieval = retrieval_over(&[Document::new("doc1", "apple banana apple")]).await;
        let llm = Arc::new(FakeLlm::default());
        let orchestrator = RagOrchestrator::new(retrieval, llm.clone());

        let answer = orchestrator.answer("apple").await.unwrap();
        assert_eq!(answer, "This is a test answer.");

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], PromptBuilder::build("apple banana apple", "apple"));
    }

    #[tokio::test]
    async fn config_bounds_the_context() {
        let retrieval = retrieval_over(&[Document::new("doc1", "apple banana apple")]).await;
        let llm = Arc::new(FakeLlm::default());
        let config = RagConfig::builder().max_context_chars(5).build().unwrap();
        let orchestrator = RagOrchestrator::new(retrieval, llm.clone()).with_config(&config);

        orchestrator.answer("apple").await.unwrap();
        assert_eq!(llm.prompts.lock().unwrap()[0], PromptBuilder::build("", "apple"));
    }

    #[tokio::test]
    async fn generation_failure_propagates() {
        let retrieval = retrieval_over(&[Document::new("doc1", "x")]).await;
        let orchestrator = RagOrchestrator::new(retrieval, Arc::new(DownLlm));
        let err = orchestrator.answer("x").await.unwrap_err();
        assert!(matches!(err, RagError::GenerationError { .. }));
    }

    #[tokio::test]
    async fn invalid_query_never_reaches_the_model() {
        let retrieval = retrieval_over(&[]).await;
        let llm = Arc::new(FakeLlm::default());
        let orchestrator = RagOrchestrator::new(retrieval, llm.clone());
        assert!(matches!(orchestrator.answer(" ").await, Err(RagError::InvalidArgument(_))));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }
}
