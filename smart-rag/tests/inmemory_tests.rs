//! Property tests for in-memory vector store search ordering.

use std::collections::HashMap;

use proptest::prelude::*;
use smart_rag::document::{DocumentChunk, EmbeddingVector, Metadata};
use smart_rag::inmemory::{DistanceMetric, InMemoryVectorStore};
use smart_rag::vectorstore::VectorStore;

/// Generate an embedding of the given dimension.
fn arb_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim)
}

/// Generate a chunk together with its embedding.
fn arb_record(dim: usize) -> impl Strategy<Value = (DocumentChunk, Vec<f32>)> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_embedding(dim)).prop_map(|(doc_id, text, embedding)| {
        (DocumentChunk::new(doc_id, 0, text, Metadata::new()), embedding)
    })
}

fn arb_metric() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![
        Just(DistanceMetric::SquaredL2),
        Just(DistanceMetric::Cosine),
        Just(DistanceMetric::InnerProduct),
    ]
}

/// *For any* set of records stored in an `InMemoryVectorStore`, querying SHALL
/// return results in non-decreasing distance order, at most `top_k` of them,
/// and never more than the number of distinct chunk ids.
mod prop_inmemory_query_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ascending_and_bounded_by_top_k(
            records in proptest::collection::vec(arb_record(DIM), 1..20),
            query in arb_embedding(DIM),
            top_k in 1usize..25,
            metric in arb_metric(),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, unique_count) = rt.block_on(async {
                let store = InMemoryVectorStore::with_metric("test", metric).unwrap();

                let unique: HashMap<String, ()> =
                    records.iter().map(|(chunk, _)| (chunk.id.clone(), ())).collect();

                let chunks: Vec<DocumentChunk> = records.iter().map(|(c, _)| c.clone()).collect();
                let embeddings: Vec<EmbeddingVector> =
                    records.iter().map(|(_, e)| EmbeddingVector::new(e.clone())).collect();
                store.add_chunks(&chunks, &embeddings).await.unwrap();

                assert_eq!(store.count().await.unwrap(), unique.len());
                let results =
                    store.query(&EmbeddingVector::new(query.clone()), top_k).await.unwrap();
                (results, unique.len())
            });

            prop_assert!(results.len() <= top_k);
            prop_assert_eq!(results.len(), top_k.min(unique_count));

            for window in results.windows(2) {
                prop_assert!(
                    window[0].score <= window[1].score,
                    "results not in ascending order: {} > {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
