//! Bounded context assembly from ranked retrieval results.

use crate::document::ScoredDocumentChunk;

/// Separator placed between consecutive included chunks.
pub const SEPARATOR: &str = "\n\n---\n\n";

/// Default character budget for an assembled context.
pub const DEFAULT_MAX_CHARS: usize = 8000;

/// Concatenates chunk contents in retrieval order under a character budget.
///
/// Lengths are counted in characters (Unicode scalar values), not bytes.
/// A chunk is either included whole or not at all, and the first chunk that
/// would overflow the budget ends the scan.
///
/// # Example
///
/// ```rust,ignore
/// use smart_rag::ContextBuilder;
///
/// let context = ContextBuilder.build(&results, 8000);
/// assert!(context.chars().count() <= 8000);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBuilder;

impl ContextBuilder {
    /// Join chunk contents with [`SEPARATOR`] without exceeding `max_chars`.
    pub fn build(&self, chunks: &[ScoredDocumentChunk], max_chars: usize) -> String {
        if chunks.is_empty() {
            return String::new();
        }

        let separator_len = SEPARATOR.chars().count();
        let mut parts: Vec<&str> = Vec::new();
        let mut total = 0usize;

        for scored in chunks {
            let content = scored.chunk.content.as_str();
            // The separator is only charged between included chunks.
            let separator = if parts.is_empty() { 0 } else { separator_len };
            let contribution = separator + content.chars().count();
            if total + contribution > max_chars {
                break;
            }
            parts.push(content);
            total += contribution;
        }

        parts.join(SEPARATOR)
    }
}
