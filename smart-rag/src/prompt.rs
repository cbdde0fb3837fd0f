//! Prompt template for grounded answer generation.

/// Renders retrieved context and a user question into an LLM prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the prompt. The model is told to answer only from `context`.
    pub fn build(context: &str, query: &str) -> String {
        format!(
            "Answer the question using only the information from the context below. \
             If the answer is not in the context, say \"I don't have enough information to answer that.\"\n\
             \n\
             Context:\n\
             {context}\n\
             \n\
             Question: {query}\n\
             \n\
             Answer:"
        )
    }
}
