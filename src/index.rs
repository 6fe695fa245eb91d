//! In-memory nearest-neighbor index over chunk embeddings.

use crate::document::{Chunk, SearchResult};

/// An in-memory collection of embedded [`Chunk`]s supporting nearest-K
/// lookup by cosine similarity.
///
/// An index is built fresh on each ingest, owned exclusively by one
/// session, and dropped on reset. Chunks are kept in insertion order, which
/// also breaks similarity ties in [`search`](VectorIndex::search).
#[derive(Debug, Default)]
pub struct VectorIndex {
    chunks: Vec<Chunk>,
}

impl VectorIndex {
    /// Create an index over the given chunks. Chunks must have embeddings
    /// attached; an empty slate is a valid (empty) index.
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// The number of chunks in the index.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index contains no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Return the `k` chunks nearest to `embedding` by cosine similarity,
    /// in descending score order. Ties keep insertion order. If the index
    /// holds fewer than `k` chunks, all of them are returned.
    pub fn search(&self, embedding: &[f32], k: usize) -> Vec<SearchResult> {
        let mut scored: Vec<SearchResult> = self
            .chunks
            .iter()
            .map(|chunk| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(&chunk.embedding, embedding),
            })
            .collect();

        // Stable sort preserves insertion order among equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
