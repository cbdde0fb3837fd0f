//! Data types for documents, chunks, embeddings, and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A JSON-primitive metadata value.
///
/// Nested objects and arrays are not representable, which keeps metadata
/// storable by any vector backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetadataValue {
    /// JSON `null`.
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Open-ended key-value metadata attached to documents and chunks.
pub type Metadata = HashMap<String, MetadataValue>;

/// A source document containing text content and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Caller-assigned unique identifier.
    pub id: String,
    /// The text content of the document.
    pub content: String,
    /// Key-value metadata associated with the document.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with empty metadata.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), content: content.into(), metadata: Metadata::new() }
    }

    /// Attach a metadata entry, replacing any previous value under `key`.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A segment of a [`Document`] selected for embedding and storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentChunk {
    /// Identifier derived from `document_id` and `index`, see [`DocumentChunk::chunk_id`].
    pub id: String,
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// The text content of the chunk.
    pub content: String,
    /// Zero-based position of the chunk within its document.
    pub index: usize,
    /// Metadata copied from the parent document.
    #[serde(default)]
    pub metadata: Metadata,
}

impl DocumentChunk {
    /// Create a chunk whose `id` is derived from `document_id` and `index`.
    pub fn new(
        document_id: impl Into<String>,
        index: usize,
        content: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        let document_id = document_id.into();
        Self {
            id: Self::chunk_id(&document_id, index),
            document_id,
            content: content.into(),
            index,
            metadata,
        }
    }

    /// The deterministic chunk identifier: `{document_id}::chunk:{index}`.
    ///
    /// Re-indexing a document under the same chunking policy yields the same
    /// ids, so stores upsert instead of duplicating.
    pub fn chunk_id(document_id: &str, index: usize) -> String {
        format!("{document_id}::chunk:{index}")
    }
}

/// A dense embedding vector. Its dimension is the vector length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EmbeddingVector {
    /// The vector components.
    pub vector: Vec<f32>,
}

impl EmbeddingVector {
    /// Wrap raw components.
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// Borrow the components.
    pub fn as_slice(&self) -> &[f32] {
        &self.vector
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(vector: Vec<f32>) -> Self {
        Self { vector }
    }
}

/// A retrieved [`DocumentChunk`] paired with its distance score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredDocumentChunk {
    /// The retrieved chunk.
    pub chunk: DocumentChunk,
    /// Distance to the query (lower is more similar).
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_id_is_derived_from_document_and_index() {
        let chunk = DocumentChunk::new("doc-7", 3, "text", Metadata::new());
        assert_eq!(chunk.id, "doc-7::chunk:3");
        assert_eq!(chunk.id, DocumentChunk::chunk_id("doc-7", 3));
        assert_eq!(chunk.document_id, "doc-7");
    }

    #[test]
    fn metadata_values_serialize_as_plain_json() {
        let doc = Document::new("d", "c")
            .with_metadata("lang", "en")
            .with_metadata("pages", 12i64)
            .with_metadata("draft", false);
        let json = serde_json::to_value(&doc.metadata).unwrap();
        assert_eq!(json["lang"], "en");
        assert_eq!(json["pages"], 12);
        assert_eq!(json["draft"], false);
    }

    #[test]
    fn metadata_values_deserialize_untagged() {
        let parsed: Metadata =
            serde_json::from_str(r#"{"a": null, "b": true, "c": 3, "d": 1.5, "e": "x"}"#).unwrap();
        assert_eq!(parsed["a"], MetadataValue::Null);
        assert_eq!(parsed["b"], MetadataValue::Bool(true));
        assert_eq!(parsed["c"], MetadataValue::Integer(3));
        assert_eq!(parsed["d"], MetadataValue::Float(1.5));
        assert_eq!(parsed["e"], MetadataValue::String("x".into()));
    }

    #[test]
    fn nested_metadata_is_rejected() {
        let parsed = serde_json::from_str::<Metadata>(r#"{"a": {"nested": 1}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn embedding_dimension_is_vector_length() {
        let v = EmbeddingVector::from(vec![0.0, 1.0, 2.0]);
        assert_eq!(v.dim(), 3);
        assert_eq!(v.as_slice(), &[0.0, 1.0, 2.0]);
    }
}
