//! # RAG Basic Example
//!
//! Demonstrates the retrieval core: index documents, then query them and
//! print the ranked chunks and the assembled context.
//!
//! Uses `InMemoryVectorStore` and the deterministic `HashingEmbeddingProvider`
//! so it runs with **zero API keys**.
//!
//! Run: `cargo run -p smart-rag --example rag_basic`

use std::sync::Arc;

use smart_rag::{
    Document, HashingEmbeddingProvider, InMemoryVectorStore, IndexingService, RagConfig,
    RetrievalService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -- 1. Configure ---------------------------------------------------------
    // A small context budget makes the cut-off visible in the output.
    let config = RagConfig::builder()
        .collection_name("knowledge_base")
        .default_top_k(3)
        .max_context_chars(300)
        .build()?;

    // -- 2. Wire the services with in-memory components ----------------------
    let embedder = Arc::new(HashingEmbeddingProvider::new(config.embedding_dimensions));
    let store = Arc::new(InMemoryVectorStore::new(config.collection_name.clone())?);
    let indexing = IndexingService::new(embedder.clone(), store.clone());
    let retrieval = RetrievalService::new(embedder, store.clone());

    // -- 3. Index sample documents -------------------------------------------
    let documents = vec![
        Document::new(
            "rust",
            "Rust is a systems programming language focused on safety, speed, and \
             concurrency. It achieves memory safety without a garbage collector through \
             its ownership system.",
        )
        .with_metadata("topic", "rust"),
        Document::new(
            "python",
            "Python is a high-level, interpreted programming language known for its \
             readability. It is widely used in data science, web development, and automation.",
        )
        .with_metadata("topic", "python"),
        Document::new(
            "rag",
            "Retrieval-Augmented Generation combines a retrieval system with a language \
             model. Documents are embedded and stored in a vector database, and the most \
             relevant ones are passed to the model as context.",
        )
        .with_metadata("topic", "rag"),
    ];

    let written = indexing.index_documents(&documents).await?;
    println!("Indexed {} documents into {written} chunk(s)", documents.len());
    println!("Store now holds {} record(s)", store.count().await?);

    // -- 4. Query ---------------------------------------------------------------
    let queries = ["memory safety in programming", "data science language", "vector database"];

    for query in &queries {
        println!("\nQuery: \"{query}\"");
        let (results, context) = retrieval
            .retrieve_with_context(query, config.default_top_k, config.max_context_chars)
            .await?;
        for (i, result) in results.iter().enumerate() {
            println!(
                "  {}. [distance={:.4}] {} | {}",
                i + 1,
                result.score,
                result.chunk.id,
                result.chunk.content.chars().take(60).collect::<String>(),
            );
        }
        println!("  context: {} of {} chars", context.chars().count(), config.max_context_chars);
    }

    println!("\nDone.");
    Ok(())
}
