//! Data types for documents, chunks, retrieval results, and chat history.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Metadata key identifying where a document came from.
pub const SOURCE_KEY: &str = "source";

/// The `source` value used for documents synthesized from pasted text.
pub const TEXT_INPUT_SOURCE: &str = "text_input";

/// A source document: one page or record of loaded content, or one pasted
/// text input. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub content: String,
    /// Key-value metadata (source path, page number, ...).
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with the given id, content, and a `source` entry.
    pub fn new(id: impl Into<String>, content: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(SOURCE_KEY.to_string(), source.into());
        Self { id: id.into(), content: content.into(), metadata }
    }

    /// Create exactly one document from raw pasted text, with
    /// `source = "text_input"`.
    ///
    /// Ids carry a process-wide counter so repeated pasted texts never
    /// produce colliding chunk ids.
    pub fn from_text(raw: impl Into<String>) -> Self {
        static TEXT_INPUT_SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = TEXT_INPUT_SEQ.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("{TEXT_INPUT_SOURCE}_{seq}"), raw, TEXT_INPUT_SOURCE)
    }
}

/// A bounded-length contiguous segment of one [`Document`], with its vector
/// embedding once the index builder has attached one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, `{document_id}_{chunk_index}`.
    pub id: String,
    /// The text content of the chunk.
    pub content: String,
    /// The embedding for this chunk's content. Empty until attached.
    pub embedding: Vec<f32>,
    /// Metadata inherited from the parent document plus `chunk_index`.
    pub metadata: HashMap<String, String>,
    /// The id of the parent [`Document`]. Chunks never span documents.
    pub document_id: String,
}

/// A retrieved [`Chunk`] paired with a similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is more relevant).
    pub score: f32,
}

/// The citation view of a retrieved chunk, as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    /// The chunk's text content.
    pub content: String,
    /// The chunk's metadata.
    pub metadata: HashMap<String, String>,
}

impl From<Chunk> for Source {
    fn from(chunk: Chunk) -> Self {
        Self { content: chunk.content, metadata: chunk.metadata }
    }
}

/// The outcome of one ask: the model's answer plus the retrieved sources
/// in nearest-first order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The model's natural-language answer.
    pub answer: String,
    /// The retrieved chunks backing the answer, nearest first.
    pub sources: Vec<Source>,
}

/// One question/answer exchange in a session's chat history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    /// The question as asked.
    pub question: String,
    /// The answer the model produced.
    pub answer: String,
}
